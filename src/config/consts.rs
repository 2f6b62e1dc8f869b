// src/config/consts.rs

// Output layout
pub const DEFAULT_PDF_DIR: &str = "out/pdfs";
pub const DEFAULT_DEBUG_DIR: &str = "out/debug";
pub const DEFAULT_DUMP_FILE: &str = "out/parsed_rows.json";
pub const LOG_FILE_NAME: &str = "scrape.log";
pub const DEBUG_TABLE_PREFIX: &str = "table_";

// Net
pub const USER_AGENT: &str = concat!("standards_scrape/", env!("CARGO_PKG_VERSION"));
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 60;
pub const UPSERT_TIMEOUT_SECS: u64 = 180;
pub const UPSERT_BATCH_SIZE: usize = 500;
pub const ERROR_BODY_MAX: usize = 800;

// Concurrency
pub const WORKERS: usize = 2;
pub const REQUEST_PAUSE_MS: u64 = 150; // be polite

// Tabula
pub const DEFAULT_JAVA_BIN: &str = "java";

// Exit codes
pub const EXIT_OK: i32 = 0;
pub const EXIT_NO_ROWS: i32 = 4;
