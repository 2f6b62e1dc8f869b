// src/file.rs

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::debug;

use crate::config::consts::DEBUG_TABLE_PREFIX;
use crate::config::sources::SourceKind;
use crate::csv::{parse_rows, write_rows};
use crate::error::{Result, ScrapeError};
use crate::extract::{ExtractMode, RawTable};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Where the debug CSVs of one (source kind, mode) live:
/// `usa/lattice`, `usa/stream`, `usa/text`, `cadda` (lattice), `cadda/text`, …
pub fn debug_tables_dir(root: &Path, kind: SourceKind, mode: ExtractMode) -> PathBuf {
    let dir = root.join(kind.as_str());
    match (kind, mode) {
        (SourceKind::Cadda, ExtractMode::Lattice) => dir,
        (_, mode) => dir.join(mode.as_str()),
    }
}

fn debug_table_name(i: usize) -> String {
    format!("{DEBUG_TABLE_PREFIX}{i:03}.csv")
}

fn is_debug_table(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(DEBUG_TABLE_PREFIX) && n.ends_with(".csv"))
}

/// `NNN` of `table_NNN.csv`.
fn debug_table_index(path: &Path) -> Option<usize> {
    path.file_stem()?
        .to_str()?
        .strip_prefix(DEBUG_TABLE_PREFIX)?
        .parse()
        .ok()
}

/// `table_NNN.csv` files in `dir`, in numeric order (`table_999` before
/// `table_1000`).
fn list_debug_tables(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_debug_table(&path) {
            out.push(path);
        }
    }
    out.sort_by(|a, b| {
        debug_table_index(a)
            .cmp(&debug_table_index(b))
            .then_with(|| a.cmp(b))
    });
    Ok(out)
}

/// Dump every raw table as `table_NNN.csv` (headers first) into `dir`.
/// Stale `table_*.csv` files from an earlier run are removed first so the
/// directory always mirrors the latest extraction.
pub fn save_debug_tables(tables: &[RawTable], dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_directory(dir)?;
    for stale in list_debug_tables(dir)? {
        fs::remove_file(stale)?;
    }

    let mut written = Vec::with_capacity(tables.len());
    for (i, t) in tables.iter().enumerate() {
        let path = dir.join(debug_table_name(i));
        let out = BufWriter::new(File::create(&path)?);
        write_rows(out, Some(&t.headers), &t.rows)?;
        written.push(path);
    }
    debug!("wrote {} debug tables to {}", written.len(), dir.display());
    Ok(written)
}

/// Inverse of [`save_debug_tables`]. Page numbers are not kept in the CSVs.
pub fn load_debug_tables(dir: &Path) -> Result<Vec<RawTable>> {
    let mut tables = Vec::new();
    for path in list_debug_tables(dir)? {
        let grid = parse_rows(BufReader::new(File::open(&path)?))?;
        if let Some(t) = RawTable::from_grid(None, grid) {
            tables.push(t);
        }
    }
    Ok(tables)
}

/// Pretty JSON, UTF-8 kept as-is.
pub fn write_json_dump<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_tables_list_in_numeric_order() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["table_1000.csv", "table_101.csv", "table_999.csv", "table_002.csv", "notes.csv"] {
            fs::write(tmp.path().join(name), "a\n").unwrap();
        }

        let names: Vec<_> = list_debug_tables(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["table_002.csv", "table_101.csv", "table_999.csv", "table_1000.csv"]);
    }

    #[test]
    fn index_comes_from_the_file_stem() {
        assert_eq!(debug_table_index(Path::new("x/table_1000.csv")), Some(1000));
        assert_eq!(debug_table_index(Path::new("x/table_abc.csv")), None);
    }
}
