//! Boundary ingest pipeline.
//!
//! Reads a GeoJSON FeatureCollection of town boundaries, repairs what it
//! can, and persists the result into an indexed on-disk store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use banyan::config::Config;
use banyan::source::GeoJsonSource;
use banyan::Ingestor;

#[derive(Parser, Debug)]
#[command(name = "ingest")]
#[command(about = "Ingest town boundaries into a point-in-polygon store")]
struct Args {
    /// GeoJSON FeatureCollection to import
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Store directory
    #[arg(long)]
    db: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a JSON report of repaired and skipped features
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(db) = args.db {
        config.store.path = db;
    }
    if let Some(file) = args.file {
        config.ingest.source = Some(file);
    }
    if let Some(report) = args.report {
        config.ingest.report = Some(report);
    }

    let source_path = config
        .ingest
        .source
        .clone()
        .context("No input file: pass --file or set [ingest] source")?;

    info!("Banyan Ingest Pipeline");
    info!("File: {}", source_path.display());
    info!("Store: {}", config.store.path.display());

    let mut source = GeoJsonSource::from_path(&source_path)
        .with_context(|| format!("Failed to read {}", source_path.display()))?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let report = Ingestor::new()
        .with_progress(pb)
        .run(&mut source, &config.store.connector())
        .context("Ingest failed; nothing was persisted")?;

    if let Some(path) = &config.ingest.report {
        report.write_json(path)?;
        info!("Report written to {}", path.display());
    }

    info!(
        "Done: {} inserted, {} repaired, {} skipped",
        report.inserted,
        report.repaired.len(),
        report.skipped.len()
    );

    Ok(())
}
