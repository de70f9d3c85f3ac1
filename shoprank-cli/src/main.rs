//! shoprank CLI
//!
//! Two subcommands over the shoprank library:
//!
//! 1. `extract`: read an accessibility snapshot and print product candidates
//! 2. `rank`: read JSONL product records and print a ranked report
//!
//! Logs go to stderr (filtered by `RUST_LOG`, or `-v`/`-vv`). Stdout only ever
//! carries a result or a `{"error": ..., "products": []}` payload.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use shoprank::prelude::*;
use shoprank::ranking::check_budget;
use shoprank::report;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Extract and rank products from accessibility snapshots
///
/// Examples:
///   shoprank extract snapshot.txt                 # JSON candidates
///   shoprank extract snapshot.txt --simple        # asin<TAB>name lines
///   shoprank rank products.jsonl --budget 30      # Markdown report
///   shoprank rank products.jsonl --priority price --json
#[derive(Parser, Debug)]
#[command(name = "shoprank")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// What to do
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file
    ///
    /// Overrides extraction keywords, the lookahead window, and ranking
    /// weights. Missing keys keep their defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract product candidates from a snapshot file
    Extract {
        /// Snapshot file
        snapshot: PathBuf,

        /// Print `asin<TAB>name` lines instead of JSON
        #[arg(long)]
        simple: bool,
    },

    /// Rank product records from a JSONL file
    Rank {
        /// JSONL file, one product record per line
        products: PathBuf,

        /// Maximum price; pricier items are excluded
        #[arg(short, long, value_parser = parse_budget)]
        budget: Option<f64>,

        /// What to favour: rating, price, reviews or features
        #[arg(short, long, default_value = "rating")]
        priority: Priority,

        /// Number of products to show
        #[arg(short = 't', long, default_value = "5")]
        top: usize,

        /// Print ranked records as JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(&cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let payload = error_payload(&err);
            match serde_json::to_string_pretty(&payload) {
                Ok(json) => {
                    if let Err(io) = writeln!(out, "{json}") {
                        eprintln!("{err:#} ({io})");
                    }
                }
                Err(_) => eprintln!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, json: bool) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn parse_budget(raw: &str) -> Result<f64, String> {
    let budget: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    check_budget(budget).map_err(|e| e.to_string())
}

fn error_payload(err: &anyhow::Error) -> ErrorPayload {
    match err.downcast_ref::<ShoprankError>() {
        Some(err) => ErrorPayload::from(err),
        None => ErrorPayload::new(format!("{err:#}")),
    }
}

fn load_config(cli: &Cli) -> Result<ShoprankConfig> {
    Ok(match &cli.config {
        Some(path) => ShoprankConfig::from_path(path)?,
        None => ShoprankConfig::default(),
    })
}

/// Runs one subcommand, writing its result to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Command::Extract { snapshot, simple } => {
            let extractor = SnapshotExtractor::new(&config.extraction)?;
            let candidates = extractor.extract_path(snapshot)?;
            if *simple {
                write!(out, "{}", report::candidates_tsv(&candidates))?;
            } else {
                writeln!(out, "{}", report::candidates_json(&candidates)?)?;
            }
        }
        Command::Rank {
            products,
            budget,
            priority,
            top,
            json,
        } => {
            let loaded = load_products(products)?;
            if !loaded.skipped.is_empty() {
                warn!(skipped = loaded.skipped.len(), "some product lines could not be parsed");
            }
            if loaded.records.is_empty() {
                return Err(ShoprankError::Empty(products.clone()).into());
            }

            let ranker = Ranker::with_config(*priority, *budget, config.ranking)?;
            let ranked = ranker.rank(loaded.records);
            if *json {
                writeln!(out, "{}", report::ranked_json(&ranked, *top)?)?;
            } else {
                write!(out, "{}", report::ranked_markdown(&ranked, *priority, *budget, *top))?;
            }
        }
    }

    Ok(())
}
