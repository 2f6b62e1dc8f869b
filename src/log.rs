// src/log.rs
//
// tracing setup: compact lines on stderr plus a plain-text copy appended to
// `<debug_dir>/scrape.log`, which is shipped along with the debug CSVs.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::Result;
use crate::file::ensure_directory;

/// Default filter when `RUST_LOG` is unset.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "standards_scrape=info",
        1 => "standards_scrape=debug",
        _ => "standards_scrape=trace,reqwest=debug",
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(log_path: &Path, verbose: u8) -> Result<()> {
    if let Some(dir) = log_path.parent() {
        if !dir.as_os_str().is_empty() {
            ensure_directory(dir)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init();
    Ok(())
}
