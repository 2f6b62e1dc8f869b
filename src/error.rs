// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("download failed: {status} {url}")]
    Download { url: String, status: u16 },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(
        "tabula is not available ({reason}).\n\
         Install a Java runtime (e.g. `apt-get install default-jre`) and point \
         TABULA_JAR at tabula-java's jar-with-dependencies, or use `--extractor text`."
    )]
    TabulaUnavailable { reason: String },

    #[error("tabula failed on {}: {stderr}", pdf.display())]
    Tabula { pdf: PathBuf, stderr: String },

    #[error("pdf text extraction failed: {0}")]
    Pdf(String),

    #[error("missing SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY")]
    MissingCredentials,

    #[error("upsert {table} failed: {status} {body}")]
    Upsert { table: String, status: u16, body: String },

    #[error("unknown source: {0}")]
    UnknownSource(String),

    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}
