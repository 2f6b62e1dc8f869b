// src/runner.rs
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, mpsc, atomic::{AtomicUsize, Ordering}};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::{
    config::{
        consts::{EXIT_NO_ROWS, EXIT_OK, REQUEST_PAUSE_MS, WORKERS},
        options::{OutputOptions, RunOptions, UpsertOptions},
        sources::{Source, SourceMeta},
    },
    core::net,
    error::Result,
    extract::{self, ExtractJob, Extractor},
    file::{debug_tables_dir, save_debug_tables, write_json_dump},
    model::{ParsedRows, Table},
    progress::Progress,
    report::{SourceReport, SummaryContext, render_summary},
    specs::{cadda::parse_cadda_tables, usa::parse_usa_tables},
    store::{SupabaseStore, UpsertOutcome},
};

/// Everything a run produced.
pub struct RunSummary {
    pub reports: Vec<SourceReport>,
    /// Deduplicated rows, as dumped and upserted.
    pub rows: ParsedRows,
    pub dump_path: PathBuf,
    pub only_download: bool,
    pub upsert: bool,
    pub elapsed: Duration,
}

impl RunSummary {
    /// 4 when a parsing run ended with no rows at all, else 0.
    pub fn exit_code(&self) -> i32 {
        if !self.only_download && self.rows.is_empty() { EXIT_NO_ROWS } else { EXIT_OK }
    }

    pub fn render(&self) -> String {
        render_summary(&self.reports, &SummaryContext {
            only_download: self.only_download,
            upsert: self.upsert,
            elapsed_s: self.elapsed.as_secs_f64(),
            usa_rows: self.rows.usa.len(),
            cadda_rows: self.rows.cadda.len(),
            dump_path: &self.dump_path,
        })
    }
}

/// Top-level runner: download → extract → parse → dedup → upsert → dump.
/// Per-source failures end up in the reports; only setup and dump errors
/// are returned.
pub fn run(opts: &RunOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    let selected = opts.scrape.sources.resolve()?;
    run_sources(opts, &selected, progress)
}

/// Same as [`run`] over an explicit source list; `opts.scrape.sources` is
/// ignored.
pub fn run_sources(
    opts: &RunOptions,
    selected: &[&Source],
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let t0 = Instant::now();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(selected.len());
    }

    let mut reports: Vec<SourceReport> = selected
        .iter()
        .map(|s| SourceReport::new(s, opts.output.pdf_path(s)))
        .collect();

    fetch_all(selected, &mut reports, opts, progress.as_deref_mut())?;

    let mut parsed = ParsedRows::default();
    if !opts.scrape.only_download {
        parse_all(selected, &mut reports, opts, &mut parsed, progress.as_deref_mut());
    }

    let rows = parsed.deduped();
    for rep in &mut reports {
        rep.dedup_rows = rows.len(rep.kind.table());
    }
    info!(usa = rows.usa.len(), cadda = rows.cadda.len(), "rows after dedup");

    if opts.upsert.enabled {
        upsert_all(&rows, &mut reports, &opts.upsert);
    }

    write_json_dump(&opts.output.dump_path, &rows)?;
    info!("dump written to {}", opts.output.dump_path.display());

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    Ok(RunSummary {
        reports,
        rows,
        dump_path: opts.output.dump_path.clone(),
        only_download: opts.scrape.only_download,
        upsert: opts.upsert.enabled,
        elapsed: t0.elapsed(),
    })
}

/* ---------------- Download ---------------- */

fn fetch_all(
    sources: &[&Source],
    reports: &mut [SourceReport],
    opts: &RunOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<()> {
    if opts.scrape.skip_download {
        for rep in reports.iter_mut() {
            match fs::metadata(&rep.pdf_path) {
                Ok(m) if m.is_file() => {
                    rep.downloaded = true;
                    rep.pdf_bytes = m.len();
                    debug!("reusing {}", rep.pdf_path.display());
                    if opts.scrape.only_download {
                        if let Some(p) = progress.as_deref_mut() {
                            p.item_done(&rep.key);
                        }
                    }
                }
                _ => {
                    rep.fail("download", format!("no cached PDF at {}", rep.pdf_path.display()));
                    rep.warn("Run once without --skip-download to fetch the PDF.");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&rep.key, "no cached PDF");
                    }
                }
            }
        }
        return Ok(());
    }

    let client = net::client()?;

    // (report index, url, destination)
    let jobs: Arc<Vec<(usize, String, PathBuf)>> = Arc::new(
        sources
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.url.to_string(), opts.output.pdf_path(s)))
            .collect(),
    );
    for (_, url, _) in jobs.iter() {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("==> downloading {url}"));
        }
    }

    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, std::result::Result<u64, String>)>();
    let workers = WORKERS.min(jobs.len()).max(1);

    for _ in 0..workers {
        let jobs = Arc::clone(&jobs);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();
        let client = client.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= jobs.len() {
                    break;
                }
                let (ri, url, path) = &jobs[i];
                let result = net::download(&client, url, path).map_err(|e| e.to_string());
                let _ = tx.send((*ri, result));
                thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS)); // be polite
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    for _ in 0..jobs.len() {
        match res_rx.recv() {
            Ok((i, Ok(bytes))) => {
                let rep = &mut reports[i];
                rep.downloaded = true;
                rep.pdf_bytes = bytes;
                info!("{}: {} bytes -> {}", rep.key, bytes, rep.pdf_path.display());
                // Otherwise the parse stage reports the source.
                if opts.scrape.only_download {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&rep.key);
                    }
                }
            }
            Ok((i, Err(msg))) => {
                let rep = &mut reports[i];
                warn!("{}: download failed: {msg}", rep.key);
                rep.fail("download", &msg);
                rep.warn("Could not download the PDF.");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&rep.key, &msg);
                }
            }
            Err(_) => break, // workers ended early; bail gracefully
        }
    }
    Ok(())
}

/* ---------------- Extract + parse ---------------- */

fn parse_all(
    sources: &[&Source],
    reports: &mut [SourceReport],
    opts: &RunOptions,
    parsed: &mut ParsedRows,
    mut progress: Option<&mut (dyn Progress + '_)>,
) {
    let extractor = match extract::build(
        opts.scrape.extractor,
        &opts.scrape.tabula,
        &opts.output.debug_dir,
    ) {
        Ok(e) => e,
        Err(e) => {
            // Same outcome as a parse failure on every downloaded source.
            let msg = e.to_string();
            for rep in reports.iter_mut().filter(|r| r.downloaded) {
                rep.fail("parse", &msg);
                rep.warn("Parsing failed (see error).");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&rep.key, &msg);
                }
            }
            return;
        }
    };
    info!("extractor: {}", extractor.name());

    for (src, rep) in sources.iter().zip(reports.iter_mut()) {
        if !rep.downloaded || rep.error.is_some() {
            continue;
        }
        match parse_source(src, rep, extractor.as_ref(), &opts.output, parsed) {
            Ok(()) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!(
                        "parse {}: rows={} mode={}",
                        rep.key, rep.parsed_rows, rep.parse_mode
                    ));
                    p.item_done(&rep.key);
                }
            }
            Err(e) => {
                warn!("{}: parse failed: {e}", rep.key);
                rep.fail("parse", &e);
                rep.warn("Parsing failed (see error).");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&rep.key, &e.to_string());
                }
            }
        }
    }
}

/// Walk the extractor's mode plan until a mode yields rows.
fn parse_source(
    src: &Source,
    rep: &mut SourceReport,
    extractor: &dyn Extractor,
    out: &OutputOptions,
    parsed: &mut ParsedRows,
) -> Result<()> {
    let kind = src.kind();
    let plan = extractor.plan(kind);

    for (n, mode) in plan.iter().copied().enumerate() {
        let tables = extractor.extract(&ExtractJob { pdf: &rep.pdf_path, kind, mode })?;

        let dir = debug_tables_dir(&out.debug_dir, kind, mode);
        if extractor.writes_debug() {
            save_debug_tables(&tables, &dir)?;
        }
        rep.debug_dir = Some(dir);
        rep.parse_mode = mode.as_str().to_string();

        let count = match &src.meta {
            SourceMeta::Usa(meta) => {
                let rows = parse_usa_tables(&tables, meta);
                let n = rows.len();
                parsed.usa.extend(rows);
                n
            }
            SourceMeta::Cadda(meta) => {
                let rows = parse_cadda_tables(&tables, meta);
                let n = rows.len();
                parsed.cadda.extend(rows);
                n
            }
        };
        info!(key = src.key, %mode, tables = tables.len(), rows = count, "parsed");

        if count > 0 {
            rep.parsed_rows = count;
            return Ok(());
        }
        if n + 1 < plan.len() {
            debug!("{}: {mode} yielded no rows, trying the next mode", src.key);
        }
    }

    let where_ = rep
        .debug_dir
        .as_ref()
        .map_or_else(|| out.debug_dir.display().to_string(), |d| d.display().to_string());
    rep.warn(format!(
        "{} returned 0 rows. Check {where_} to retune the parser.",
        kind.as_str().to_uppercase()
    ));
    Ok(())
}

/* ---------------- Upsert ---------------- */

fn upsert_all(rows: &ParsedRows, reports: &mut [SourceReport], opts: &UpsertOptions) {
    let store = SupabaseStore::from_settings(opts.supabase_url.as_deref(), opts.supabase_key.as_deref())
        .map(|s| s.with_batch_size(opts.batch_size));

    // Each table goes out once even if several sources feed it.
    let mut done: HashMap<Table, std::result::Result<UpsertOutcome, String>> = HashMap::new();

    for rep in reports.iter_mut() {
        if rep.error.is_some() {
            continue; // download/parse already failed
        }
        let table = rep.kind.table();
        if rows.len(table) == 0 {
            rep.warn("No rows to upsert (skip).");
            continue;
        }

        rep.upsert_attempted = true;
        rep.upsert_table = Some(table);
        rep.upsert_rows = rows.len(table);

        let outcome = done.entry(table).or_insert_with(|| {
            let store = store.as_ref().map_err(|e| e.to_string())?;
            let res = match table {
                Table::StandardsUsa => store.upsert(table, &rows.usa),
                Table::StandardsCadda => store.upsert(table, &rows.cadda),
            };
            res.map_err(|e| e.to_string())
        });

        match outcome {
            Ok(o) => rep.upsert_status = Some(o.status),
            Err(e) => {
                warn!("upsert {table} failed: {e}");
                rep.fail("upsert", e);
            }
        }
    }
}
