//! greentrace CLI - Decadal NDVI trends over conservation parcels

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use greentrace_pipeline::{run, DiscardPolicy, RunConfig};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "greentrace")]
#[command(
    author,
    version,
    about = "Decadal NDVI trend analysis over conservation parcels",
    long_about = None
)]
struct Cli {
    /// GeoJSON boundary files, one study area each, processed in order
    #[arg(required = true)]
    boundaries: Vec<PathBuf>,

    /// Directory of Landsat Collection-2 surface-reflectance band files
    #[arg(short, long)]
    imagery: PathBuf,

    /// Results root; each study area writes into its own subdirectory
    #[arg(short, long, default_value = "results")]
    results: PathBuf,

    /// Keep band files the pipeline can never use instead of deleting them
    #[arg(long)]
    keep_irrelevant: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let discard = if cli.keep_irrelevant {
        DiscardPolicy::Keep
    } else {
        DiscardPolicy::Delete
    };
    if discard == DiscardPolicy::Delete {
        info!("irrelevant band files will be deleted from the imagery directory");
    }

    let config = RunConfig {
        boundaries: cli.boundaries,
        imagery_dir: cli.imagery,
        results_dir: cli.results,
        discard,
    };

    let pb = spinner("Processing study areas...");
    let summary = run(&config).context("pipeline run failed")?;
    pb.finish_and_clear();

    println!("{}", summary.change_table());
    print!("{}", summary.timing_report());

    Ok(())
}
