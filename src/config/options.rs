// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use super::sources::{self, Source};
use crate::error::{Result, ScrapeError};
use crate::extract::{ExtractorKind, tabula::TabulaConfig};

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub scrape: ScrapeOptions,
    pub output: OutputOptions,
    pub upsert: UpsertOptions,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SourceSelector {
    #[default]
    All,
    One(String),
}

impl SourceSelector {
    pub fn resolve(&self) -> Result<Vec<&'static Source>> {
        match self {
            SourceSelector::All => Ok(sources::all().iter().collect()),
            SourceSelector::One(key) => sources::by_key(key)
                .map(|s| vec![s])
                .ok_or_else(|| ScrapeError::UnknownSource(key.clone())),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScrapeOptions {
    pub sources: SourceSelector,
    /// Download PDFs and stop (no parse, no upsert).
    pub only_download: bool,
    /// Reuse PDFs already present in the pdf dir.
    pub skip_download: bool,
    pub extractor: ExtractorKind,
    pub tabula: TabulaConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    pub pdf_dir: PathBuf,
    pub debug_dir: PathBuf,
    pub dump_path: PathBuf,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            pdf_dir: PathBuf::from(DEFAULT_PDF_DIR),
            debug_dir: PathBuf::from(DEFAULT_DEBUG_DIR),
            dump_path: PathBuf::from(DEFAULT_DUMP_FILE),
        }
    }
}

impl OutputOptions {
    pub fn pdf_path(&self, source: &Source) -> PathBuf {
        self.pdf_dir.join(source.out_name)
    }

    pub fn log_path(&self) -> PathBuf {
        self.debug_dir.join(LOG_FILE_NAME)
    }

    pub fn with_root(root: &Path) -> Self {
        Self {
            pdf_dir: root.join("pdfs"),
            debug_dir: root.join("debug"),
            dump_path: root.join("parsed_rows.json"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpsertOptions {
    pub enabled: bool,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub batch_size: usize,
}

impl Default for UpsertOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            supabase_url: None,
            supabase_key: None,
            batch_size: UPSERT_BATCH_SIZE,
        }
    }
}
