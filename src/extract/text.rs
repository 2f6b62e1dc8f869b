// src/extract/text.rs
//
// Pure-Rust fallback: page text from pdf-extract, columns split on runs of
// two or more spaces (or tabs). Tables are blocks of consecutive non-blank
// lines.

use std::sync::LazyLock;

use regex::Regex;

use super::{ExtractJob, ExtractMode, Extractor, RawTable};
use crate::config::sources::SourceKind;
use crate::error::{Result, ScrapeError};

static COLUMN_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t+| {2,}").unwrap());

const MIN_TABLE_ROWS: usize = 2;

pub struct TextExtractor;

impl Extractor for TextExtractor {
    fn name(&self) -> &'static str {
        "text"
    }

    fn plan(&self, _kind: SourceKind) -> &'static [ExtractMode] {
        &[ExtractMode::Text]
    }

    fn extract(&self, job: &ExtractJob<'_>) -> Result<Vec<RawTable>> {
        let text = pdf_extract::extract_text(job.pdf).map_err(|e| ScrapeError::Pdf(e.to_string()))?;
        Ok(tables_from_text(&text))
    }
}

/// Split laid-out page text into tables.
pub fn tables_from_text(text: &str) -> Vec<RawTable> {
    let paged = text.contains('\x0c');
    let mut tables = Vec::new();

    for (i, page) in text.split('\x0c').enumerate() {
        let page_no = paged.then_some(i as u32 + 1);
        let mut block: Vec<Vec<String>> = Vec::new();

        for line in page.lines() {
            if line.trim().is_empty() {
                flush(&mut block, page_no, &mut tables);
                continue;
            }
            block.push(split_columns(line));
        }
        flush(&mut block, page_no, &mut tables);
    }
    tables
}

fn flush(block: &mut Vec<Vec<String>>, page: Option<u32>, out: &mut Vec<RawTable>) {
    if block.len() >= MIN_TABLE_ROWS {
        if let Some(t) = RawTable::from_grid(page, std::mem::take(block)) {
            out.push(t);
        }
    }
    block.clear();
}

pub fn split_columns(line: &str) -> Vec<String> {
    COLUMN_GAP
        .split(line.trim())
        .map(str::to_string)
        .collect()
}
