// src/specs/mod.rs
//! # Document "specs"
//!
//! One module per source document. Each spec encodes *where the ground truth
//! lives in the extracted tables* and *how to read it robustly*, and shapes
//! the result into typed rows (`model::UsaStandard`, `model::CaddaStandard`).
//!
//! ## What lives here
//! - **Pure table reading** over [`RawTable`](crate::extract::RawTable)s:
//!   which tables qualify, which cells are events, times, levels and
//!   categories.
//! - **Heuristics** that survive both tabula modes and the text fallback
//!   (ragged rows, merged header cells, duplicate column names).
//!
//! ## What does **not** live here
//! - **Extraction** (tabula / text / replay) – see `extract`.
//! - **Debug dumps, dedup, upsert** – handled by the runner.
//!
//! ## Typical call chain
//! ```text
//! runner → extract::Extractor::extract() → Vec<RawTable>
//!        → specs::<doc>::parse_*_tables()  → typed rows
//! ```
//!
//! ## Conventions
//! - **Case-insensitive** matching everywhere; PDFs mix "Libre", "LIBRE", "libre".
//! - A table that does not look like a standards table is skipped silently;
//!   a row that does not name an event is skipped silently.
//! - Specs are testable **offline** from hand-built tables or replayed debug CSVs.
pub mod cadda;
pub mod usa;
