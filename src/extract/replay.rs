// src/extract/replay.rs
//
// Re-reads debug CSVs from an earlier run instead of touching the PDF.

use std::path::PathBuf;

use tracing::warn;

use super::{ExtractJob, ExtractMode, Extractor, RawTable};
use crate::config::sources::SourceKind;
use crate::error::Result;
use crate::file::{debug_tables_dir, load_debug_tables};

pub struct ReplayExtractor {
    debug_root: PathBuf,
}

impl ReplayExtractor {
    pub fn new(debug_root: PathBuf) -> Self {
        Self { debug_root }
    }
}

impl Extractor for ReplayExtractor {
    fn name(&self) -> &'static str {
        "replay"
    }

    fn plan(&self, kind: SourceKind) -> &'static [ExtractMode] {
        match kind {
            SourceKind::Usa => &[ExtractMode::Lattice, ExtractMode::Stream, ExtractMode::Text],
            SourceKind::Cadda => &[ExtractMode::Lattice, ExtractMode::Text],
        }
    }

    fn extract(&self, job: &ExtractJob<'_>) -> Result<Vec<RawTable>> {
        let dir = debug_tables_dir(&self.debug_root, job.kind, job.mode);
        if !dir.is_dir() {
            warn!("no debug tables at {}", dir.display());
            return Ok(Vec::new());
        }
        load_debug_tables(&dir)
    }

    fn writes_debug(&self) -> bool {
        false
    }
}
