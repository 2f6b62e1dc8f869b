// src/core/net.rs

use std::{fs, path::Path, time::Duration};

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::consts::{DOWNLOAD_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Result, ScrapeError};
use crate::file::ensure_directory;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Blocking client shared by the download workers.
pub fn client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .build()?)
}

/// GET `url` and write the body to `out_path`. Returns the byte count.
pub fn download(client: &Client, url: &str, out_path: &Path) -> Result<u64> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    debug!(%url, "GET");
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::Download { url: url.to_string(), status: status.as_u16() });
    }
    let body = resp.bytes()?;

    if !is_pdf(&body) {
        warn!(%url, "response does not start with %PDF-; writing it anyway");
    }
    fs::write(out_path, &body)?;
    Ok(body.len() as u64)
}

pub fn is_pdf(head: &[u8]) -> bool {
    head.starts_with(PDF_MAGIC)
}
