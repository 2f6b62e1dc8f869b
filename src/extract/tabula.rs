// src/extract/tabula.rs
//
// tabula-java driven over its CLI: one JVM per (pdf, mode), JSON on stdout.

use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use super::{ExtractJob, ExtractMode, Extractor, RawTable};
use crate::config::consts::DEFAULT_JAVA_BIN;
use crate::config::sources::SourceKind;
use crate::error::{Result, ScrapeError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabulaConfig {
    /// tabula-java `jar-with-dependencies`.
    pub jar: Option<PathBuf>,
    pub java: PathBuf,
}

impl Default for TabulaConfig {
    fn default() -> Self {
        Self { jar: None, java: PathBuf::from(DEFAULT_JAVA_BIN) }
    }
}

pub struct TabulaExtractor {
    cfg: TabulaConfig,
    jar: PathBuf,
}

impl TabulaExtractor {
    /// Fails with `TabulaUnavailable` when the jar is missing or Java
    /// cannot be started.
    pub fn new(cfg: TabulaConfig) -> Result<Self> {
        let jar = cfg.jar.clone().ok_or_else(|| ScrapeError::TabulaUnavailable {
            reason: "TABULA_JAR not set".into(),
        })?;
        if !jar.is_file() {
            return Err(ScrapeError::TabulaUnavailable {
                reason: format!("jar not found at {}", jar.display()),
            });
        }

        let probe = Command::new(&cfg.java).arg("-version").output();
        match probe {
            Ok(out) if out.status.success() => {}
            Ok(out) => {
                return Err(ScrapeError::TabulaUnavailable {
                    reason: format!("`{} -version` exited with {}", cfg.java.display(), out.status),
                });
            }
            Err(e) => {
                return Err(ScrapeError::TabulaUnavailable {
                    reason: format!("cannot run {}: {e}", cfg.java.display()),
                });
            }
        }

        Ok(Self { cfg, jar })
    }

    fn command(&self, job: &ExtractJob<'_>) -> Command {
        let mut cmd = Command::new(&self.cfg.java);
        cmd.arg("-Dfile.encoding=UTF8")
            .arg("-jar")
            .arg(&self.jar)
            .args(["--format", "JSON", "--pages", "all", "--guess"]);
        match job.mode {
            ExtractMode::Lattice => { cmd.arg("--lattice"); }
            ExtractMode::Stream | ExtractMode::Text => { cmd.arg("--stream"); }
        }
        cmd.arg(job.pdf);
        cmd
    }
}

impl Extractor for TabulaExtractor {
    fn name(&self) -> &'static str {
        "tabula"
    }

    fn plan(&self, kind: SourceKind) -> &'static [ExtractMode] {
        match kind {
            SourceKind::Usa => &[ExtractMode::Lattice, ExtractMode::Stream],
            SourceKind::Cadda => &[ExtractMode::Lattice],
        }
    }

    fn extract(&self, job: &ExtractJob<'_>) -> Result<Vec<RawTable>> {
        debug!(pdf = %job.pdf.display(), mode = %job.mode, "running tabula");
        let out = self.command(job).output()?;
        if !out.status.success() {
            return Err(ScrapeError::Tabula {
                pdf: job.pdf.to_path_buf(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        parse_json(&out.stdout)
    }
}

/* ---------------- tabula JSON ---------------- */

#[derive(Deserialize, Debug)]
#[serde(transparent)]
struct JsonTableSet(Vec<JsonTable>);

// Geometry fields are ignored; only the text grid is kept.
#[derive(Deserialize, Debug)]
struct JsonTable {
    #[serde(default)]
    page_number: Option<u32>,
    #[serde(default)]
    data: Vec<Vec<JsonCell>>,
}

#[derive(Deserialize, Debug)]
struct JsonCell {
    #[serde(default)]
    text: String,
}

/// Parse tabula's `--format JSON` output into raw tables.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<RawTable>> {
    let set: JsonTableSet = serde_json::from_slice(bytes)?;
    Ok(set
        .0
        .into_iter()
        .filter_map(|t| {
            let grid = t
                .data
                .into_iter()
                .map(|row| row.into_iter().map(|c| c.text).collect())
                .collect();
            RawTable::from_grid(t.page_number, grid)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tabula_json() {
        let json = br#"[
          {"extraction_method":"lattice","page_number":2,"top":10.0,"left":5.0,
           "width":100.0,"height":50.0,"right":105.0,"bottom":60.0,
           "data":[
             [{"top":10.0,"left":5.0,"width":10.0,"height":5.0,"text":"B"},
              {"top":10.0,"left":15.0,"width":10.0,"height":5.0,"text":"10 & Under\rGirls Events"}],
             [{"text":"33.09"},{"text":"50 FR SCY"}]
           ]},
          {"extraction_method":"lattice","data":[]}
        ]"#;
        let tables = parse_json(json).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].page, Some(2));
        assert_eq!(tables[0].headers, vec!["B", "10 & Under Girls Events"]);
        assert_eq!(tables[0].rows, vec![vec!["33.09".to_string(), "50 FR SCY".to_string()]]);
    }

    #[test]
    fn command_keeps_stderr_and_picks_the_mode() {
        let t = TabulaExtractor { cfg: TabulaConfig::default(), jar: PathBuf::from("tabula.jar") };
        let pdf = PathBuf::from("usa.pdf");
        let args = |mode| {
            let job = ExtractJob { pdf: &pdf, kind: SourceKind::Usa, mode };
            t.command(&job)
                .get_args()
                .map(|a| a.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
        };

        let lattice = args(ExtractMode::Lattice);
        assert!(!lattice.iter().any(|a| a == "--silent"));
        assert!(lattice.iter().any(|a| a == "--lattice"));
        assert_eq!(lattice.last().map(String::as_str), Some("usa.pdf"));
        assert!(args(ExtractMode::Stream).iter().any(|a| a == "--stream"));
    }

    #[test]
    fn missing_jar_is_unavailable() {
        let err = TabulaExtractor::new(TabulaConfig::default()).err().unwrap();
        assert!(matches!(err, ScrapeError::TabulaUnavailable { .. }));

        let cfg = TabulaConfig { jar: Some(PathBuf::from("/nonexistent/tabula.jar")), ..Default::default() };
        let err = TabulaExtractor::new(cfg).err().unwrap();
        assert!(err.to_string().contains("jar not found"));
    }
}
