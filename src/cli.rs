// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::config::consts::{DEFAULT_DEBUG_DIR, DEFAULT_DUMP_FILE, DEFAULT_JAVA_BIN, DEFAULT_PDF_DIR, UPSERT_BATCH_SIZE};
use crate::config::options::{OutputOptions, RunOptions, ScrapeOptions, SourceSelector, UpsertOptions};
use crate::config::sources;
use crate::error::Result;
use crate::extract::{ExtractorKind, tabula::TabulaConfig};
use crate::progress::ConsoleProgress;
use crate::{log, runner};

/// Scrape open swimming qualification-time PDFs (USA Swimming, CADDA)
/// into `public.standards_usa` / `public.standards_cadda`.
#[derive(Parser, Debug)]
#[command(name = "standards_scrape", version, about)]
pub struct Args {
    /// Source to run (all sources when omitted).
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(sources::keys()))]
    pub run: Option<String>,

    /// Only download the PDFs (no parse, no upsert).
    #[arg(long, conflicts_with = "skip_download")]
    pub only_download: bool,

    /// Reuse PDFs already present in --outdir.
    #[arg(long)]
    pub skip_download: bool,

    /// Upsert the parsed rows into Supabase.
    #[arg(long)]
    pub upsert: bool,

    /// Download directory.
    #[arg(long, default_value = DEFAULT_PDF_DIR)]
    pub outdir: PathBuf,

    /// Debug CSV directory (also holds scrape.log).
    #[arg(long, default_value = DEFAULT_DEBUG_DIR)]
    pub debug_dir: PathBuf,

    /// JSON dump of the parsed rows.
    #[arg(long, default_value = DEFAULT_DUMP_FILE)]
    pub dump: PathBuf,

    /// Table extraction backend.
    #[arg(long, value_enum, default_value_t = ExtractorKind::Auto)]
    pub extractor: ExtractorKind,

    /// tabula-java jar-with-dependencies.
    #[arg(long, env = "TABULA_JAR")]
    pub tabula_jar: Option<PathBuf>,

    /// Java executable used to run tabula.
    #[arg(long, env = "JAVA_BIN", default_value = DEFAULT_JAVA_BIN)]
    pub java: PathBuf,

    #[arg(long, env = "SUPABASE_URL", hide_env_values = true)]
    pub supabase_url: Option<String>,

    /// Service-role key (or any key allowed to insert/upsert).
    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
    pub supabase_key: Option<String>,

    /// Rows per upsert request.
    #[arg(long, default_value_t = UPSERT_BATCH_SIZE)]
    pub batch_size: usize,

    /// List source keys and exit.
    #[arg(long)]
    pub list: bool,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn to_options(&self) -> RunOptions {
        RunOptions {
            scrape: ScrapeOptions {
                sources: match &self.run {
                    Some(k) => SourceSelector::One(k.clone()),
                    None => SourceSelector::All,
                },
                only_download: self.only_download,
                skip_download: self.skip_download,
                extractor: self.extractor,
                tabula: TabulaConfig { jar: self.tabula_jar.clone(), java: self.java.clone() },
            },
            output: OutputOptions {
                pdf_dir: self.outdir.clone(),
                debug_dir: self.debug_dir.clone(),
                dump_path: self.dump.clone(),
            },
            upsert: UpsertOptions {
                enabled: self.upsert,
                supabase_url: self.supabase_url.clone(),
                supabase_key: self.supabase_key.clone(),
                batch_size: self.batch_size,
            },
        }
    }
}

/// Parse args, run, print the summary. Returns the process exit code.
pub fn run() -> Result<i32> {
    let args = Args::parse();

    if args.list {
        for s in sources::all() {
            println!("{},{},{}", s.key, s.kind().table().qualified_name(), s.url);
        }
        return Ok(0);
    }

    let opts = args.to_options();
    log::init(&opts.output.log_path(), args.verbose)?;

    let mut progress = ConsoleProgress::default();
    let summary = runner::run(&opts, Some(&mut progress))?;
    print!("{}", summary.render());
    Ok(summary.exit_code())
}
