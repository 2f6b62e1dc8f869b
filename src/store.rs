// src/store.rs
//
// Supabase (PostgREST) upsert over plain HTTP.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::consts::{ERROR_BODY_MAX, UPSERT_BATCH_SIZE, UPSERT_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Result, ScrapeError};
use crate::model::Table;

/// What one upsert call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub table: Table,
    pub rows: usize,
    pub batches: usize,
    /// HTTP status of the last batch.
    pub status: u16,
}

pub struct SupabaseStore {
    client: Client,
    base_url: String,
    batch_size: usize,
}

impl SupabaseStore {
    pub fn new(url: &str, key: &str) -> Result<Self> {
        if url.trim().is_empty() || key.trim().is_empty() {
            return Err(ScrapeError::MissingCredentials);
        }

        let mut headers = HeaderMap::new();
        let auth = |v: String| HeaderValue::from_str(&v).map_err(|_| ScrapeError::MissingCredentials);
        headers.insert("apikey", auth(key.to_string())?);
        headers.insert(AUTHORIZATION, auth(format!("Bearer {key}"))?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("prefer", HeaderValue::from_static("resolution=merge-duplicates"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(UPSERT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: url.trim().trim_end_matches('/').to_string(),
            batch_size: UPSERT_BATCH_SIZE,
        })
    }

    /// Build from optional settings (CLI flags / env).
    pub fn from_settings(url: Option<&str>, key: Option<&str>) -> Result<Self> {
        match (url, key) {
            (Some(u), Some(k)) => Self::new(u, k),
            _ => Err(ScrapeError::MissingCredentials),
        }
    }

    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n.max(1);
        self
    }

    pub fn endpoint(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.name())
    }

    /// POST `rows` in batches, merging on the table's conflict columns.
    /// Stops at the first failing batch.
    pub fn upsert<T: Serialize>(&self, table: Table, rows: &[T]) -> Result<UpsertOutcome> {
        let endpoint = self.endpoint(table);
        let on_conflict = table.on_conflict();
        let mut outcome = UpsertOutcome { table, rows: 0, batches: 0, status: 0 };

        for batch in rows.chunks(self.batch_size) {
            debug!(%table, rows = batch.len(), "upsert batch");
            let resp = self
                .client
                .post(&endpoint)
                .query(&[("on_conflict", on_conflict.as_str())])
                .json(batch)
                .send()?;

            let status = resp.status().as_u16();
            if status >= 300 {
                let body = resp.text().unwrap_or_default();
                return Err(ScrapeError::Upsert {
                    table: table.name().to_string(),
                    status,
                    body: truncate(&body, ERROR_BODY_MAX),
                });
            }
            outcome.rows += batch.len();
            outcome.batches += 1;
            outcome.status = status;
        }

        info!(%table, rows = outcome.rows, status = outcome.status, "upsert done");
        Ok(outcome)
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((i, _)) => s[..i].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_are_required() {
        assert!(matches!(SupabaseStore::new("", "k"), Err(ScrapeError::MissingCredentials)));
        assert!(matches!(
            SupabaseStore::from_settings(Some("https://x.supabase.co"), None),
            Err(ScrapeError::MissingCredentials)
        ));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let s = SupabaseStore::new("https://x.supabase.co/", "k").unwrap();
        assert_eq!(s.endpoint(Table::StandardsCadda), "https://x.supabase.co/rest/v1/standards_cadda");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("año año", 3), "año");
        assert_eq!(truncate("ok", 10), "ok");
    }
}
