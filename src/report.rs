// src/report.rs
//
// Per-source run report and the closing summary block.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use crate::config::sources::{Source, SourceKind};
use crate::model::Table;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warn,
    Fail,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Ok => "OK",
            Status::Warn => "WARN",
            Status::Fail => "FAIL",
        })
    }
}

#[derive(Clone, Debug)]
pub struct SourceReport {
    pub key: String,
    pub kind: SourceKind,
    pub url: String,
    pub pdf_path: PathBuf,
    pub downloaded: bool,
    pub pdf_bytes: u64,
    pub parse_mode: String,
    /// Debug CSV directory of the last mode tried.
    pub debug_dir: Option<PathBuf>,
    pub parsed_rows: usize,
    pub dedup_rows: usize,
    pub upsert_attempted: bool,
    pub upsert_table: Option<Table>,
    pub upsert_rows: usize,
    pub upsert_status: Option<u16>,
    /// Download, parse or upsert failure, prefixed with the stage.
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

impl SourceReport {
    pub fn new(source: &Source, pdf_path: PathBuf) -> Self {
        Self {
            key: source.key.to_string(),
            kind: source.kind(),
            url: source.url.to_string(),
            pdf_path,
            downloaded: false,
            pdf_bytes: 0,
            parse_mode: String::new(),
            debug_dir: None,
            parsed_rows: 0,
            dedup_rows: 0,
            upsert_attempted: false,
            upsert_table: None,
            upsert_rows: 0,
            upsert_status: None,
            error: None,
            warnings: Vec::new(),
        }
    }

    pub fn status(&self) -> Status {
        if self.error.is_some() {
            Status::Fail
        } else if self.parsed_rows == 0 {
            Status::Warn
        } else {
            Status::Ok
        }
    }

    pub fn fail(&mut self, stage: &str, err: impl fmt::Display) {
        self.error = Some(format!("{stage}: {err}"));
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Run-level facts for [`render_summary`].
#[derive(Clone, Debug)]
pub struct SummaryContext<'a> {
    pub only_download: bool,
    pub upsert: bool,
    pub elapsed_s: f64,
    pub usa_rows: usize,
    pub cadda_rows: usize,
    pub dump_path: &'a Path,
}

const RULE_WIDTH: usize = 78;

pub fn render_summary(reports: &[SourceReport], ctx: &SummaryContext<'_>) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut s = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(s, "\n{heavy}");
    let _ = writeln!(s, "OPEN SCRAPER SUMMARY");
    let _ = writeln!(s, "UTC: {}", Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
    let _ = writeln!(
        s,
        "only_download={}  upsert={}  elapsed={:.2}s",
        ctx.only_download, ctx.upsert, ctx.elapsed_s
    );
    let _ = writeln!(s, "{light}");

    for rep in reports {
        let _ = writeln!(s, "[{}] {} ({})", rep.status(), rep.key, rep.kind);
        let _ = writeln!(s, "  url: {}", rep.url);
        if rep.downloaded {
            let kb = rep.pdf_bytes as f64 / 1024.0;
            let _ = writeln!(s, "  pdf: {}  ({kb:.1} KB)", rep.pdf_path.display());
        } else {
            let _ = writeln!(s, "  pdf: (not downloaded)");
        }

        if !ctx.only_download {
            let mode = if rep.parse_mode.is_empty() { "-" } else { rep.parse_mode.as_str() };
            let _ = writeln!(
                s,
                "  parse: rows={}  mode={mode}  dedup={}",
                rep.parsed_rows, rep.dedup_rows
            );
            if let Some(dir) = &rep.debug_dir {
                let _ = writeln!(s, "  debug: {}", dir.display());
            }
        }

        if ctx.upsert {
            match (&rep.error, rep.upsert_attempted, rep.upsert_table) {
                (Some(err), true, Some(t)) => {
                    let _ = writeln!(s, "  upsert: FAIL table={t} rows={} err={err}", rep.upsert_rows);
                }
                (None, true, Some(t)) => {
                    let status = rep.upsert_status.map_or_else(|| "-".to_string(), |c| c.to_string());
                    let _ = writeln!(s, "  upsert: OK   table={t} rows={} status={status}", rep.upsert_rows);
                }
                _ => {
                    let _ = writeln!(s, "  upsert: (skip)");
                }
            }
        }

        if let Some(err) = &rep.error {
            if !(ctx.upsert && rep.upsert_attempted) {
                let _ = writeln!(s, "  error: {err}");
            }
        }
        for w in &rep.warnings {
            let _ = writeln!(s, "  warn: {w}");
        }
        let _ = writeln!(s);
    }

    let _ = writeln!(s, "{light}");
    let _ = writeln!(s, "TOTAL USA rows (dedup):   {}", ctx.usa_rows);
    let _ = writeln!(s, "TOTAL CADDA rows (dedup): {}", ctx.cadda_rows);
    let _ = writeln!(s, "Dump JSON: {}", ctx.dump_path.display());
    let _ = writeln!(s, "{heavy}");

    if reports.iter().any(|r| r.status() == Status::Fail) {
        let _ = writeln!(s, "NOTE: at least one source FAILED. See errors above.");
    } else if reports.iter().any(|r| r.status() == Status::Warn) {
        let _ = writeln!(s, "NOTE: at least one source WARNED (e.g. rows=0). Check the debug CSVs to retune the heuristics.");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sources;

    fn report() -> SourceReport {
        let src = sources::by_key(sources::USA_2024_2028_AGE_GROUP).unwrap();
        SourceReport::new(src, PathBuf::from("out/pdfs/usa.pdf"))
    }

    #[test]
    fn status_rules() {
        let mut r = report();
        assert_eq!(r.status(), Status::Warn);
        r.parsed_rows = 10;
        assert_eq!(r.status(), Status::Ok);
        r.fail("upsert", "boom");
        assert_eq!(r.status(), Status::Fail);
        assert_eq!(r.error.as_deref(), Some("upsert: boom"));
    }

    #[test]
    fn summary_lists_sources_and_totals() {
        let mut ok = report();
        ok.downloaded = true;
        ok.pdf_bytes = 2048;
        ok.parsed_rows = 12;
        ok.dedup_rows = 10;
        ok.parse_mode = "stream".into();

        let ctx = SummaryContext {
            only_download: false,
            upsert: false,
            elapsed_s: 1.5,
            usa_rows: 10,
            cadda_rows: 0,
            dump_path: Path::new("out/parsed_rows.json"),
        };
        let s = render_summary(&[ok], &ctx);
        assert!(s.contains("[OK] usa_2024_2028_age_group (usa)"));
        assert!(s.contains("(2.0 KB)"));
        assert!(s.contains("parse: rows=12  mode=stream  dedup=10"));
        assert!(s.contains("TOTAL USA rows (dedup):   10"));
        assert!(!s.contains("upsert:"));
        assert!(!s.contains("NOTE:"));
    }
}
