// src/extract/mod.rs
//! # Raw table extraction
//!
//! Turns a PDF into a list of [`RawTable`]s: untyped grids of cell text with
//! the first row promoted to headers (the shape tabula-py hands to pandas).
//! Nothing here knows about swimming; the page-specific readers in
//! [`crate::specs`] decide which tables matter and what the cells mean.
//!
//! Three backends implement [`Extractor`]:
//! - [`tabula::TabulaExtractor`] shells out to tabula-java (needs a Java
//!   runtime). Supports the `lattice` (ruled lines) and `stream`
//!   (whitespace) detection modes.
//! - [`text::TextExtractor`] is pure Rust: it lays out the page text with
//!   `pdf-extract` and splits columns on runs of spaces. Rougher, but runs
//!   anywhere.
//! - [`replay::ReplayExtractor`] reads back the debug CSVs a previous run
//!   wrote, so parser heuristics can be retuned without Java or network.

pub mod replay;
pub mod tabula;
pub mod text;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::sources::SourceKind;
use crate::core::sanitize::normalize_ws;
use crate::error::Result;

/// One extracted table. `headers` is the first non-empty row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub page: Option<u32>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build from a cell grid: cells are whitespace-normalized, empty rows
    /// dropped, the first remaining row becomes the headers.
    /// Returns `None` when nothing is left.
    pub fn from_grid(page: Option<u32>, grid: Vec<Vec<String>>) -> Option<Self> {
        let mut rows = grid
            .into_iter()
            .map(|r| r.iter().map(|c| normalize_ws(c)).collect::<Vec<_>>())
            .filter(|r| r.iter().any(|c| !c.is_empty()));
        let headers = rows.next()?;
        Some(Self { page, headers, rows: rows.collect() })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every cell including headers, for "appears anywhere" checks.
    pub fn all_cells(&self) -> impl Iterator<Item = &str> {
        self.headers
            .iter()
            .chain(self.rows.iter().flatten())
            .map(String::as_str)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtractMode {
    Lattice,
    Stream,
    Text,
}

impl ExtractMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractMode::Lattice => "lattice",
            ExtractMode::Stream => "stream",
            ExtractMode::Text => "text",
        }
    }
}

impl fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which backend to use. `Auto` prefers tabula and falls back to text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExtractorKind {
    #[default]
    Auto,
    Tabula,
    Text,
    Replay,
}

/// Inputs of one extraction call.
#[derive(Clone, Copy, Debug)]
pub struct ExtractJob<'a> {
    pub pdf: &'a Path,
    pub kind: SourceKind,
    pub mode: ExtractMode,
}

pub trait Extractor {
    fn name(&self) -> &'static str;

    /// Modes to try for a source, in order. The runner moves on to the next
    /// mode only while the previous one yields zero parsed rows.
    fn plan(&self, kind: SourceKind) -> &'static [ExtractMode];

    fn extract(&self, job: &ExtractJob<'_>) -> Result<Vec<RawTable>>;

    /// Whether the runner should dump debug CSVs for this backend's tables.
    fn writes_debug(&self) -> bool {
        true
    }
}

/// Resolve `kind` into a concrete backend.
pub fn build(
    kind: ExtractorKind,
    tabula_cfg: &tabula::TabulaConfig,
    debug_root: &Path,
) -> Result<Box<dyn Extractor>> {
    match kind {
        ExtractorKind::Tabula => Ok(Box::new(tabula::TabulaExtractor::new(tabula_cfg.clone())?)),
        ExtractorKind::Text => Ok(Box::new(text::TextExtractor)),
        ExtractorKind::Replay => Ok(Box::new(replay::ReplayExtractor::new(PathBuf::from(debug_root)))),
        ExtractorKind::Auto => match tabula::TabulaExtractor::new(tabula_cfg.clone()) {
            Ok(t) => Ok(Box::new(t)),
            Err(e) => {
                info!("tabula unavailable, using text layout extractor: {e}");
                Ok(Box::new(text::TextExtractor))
            }
        },
    }
}
