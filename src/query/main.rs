//! Point lookup against an ingested boundary store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use banyan::config::Config;
use banyan::{DiskStoreConfig, PointLocator};

#[derive(Parser, Debug)]
#[command(name = "locate")]
#[command(about = "Find the town containing a coordinate")]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Latitude (WGS84)
    latitude: f64,

    /// Longitude (WGS84)
    longitude: f64,

    /// Store directory
    #[arg(long)]
    db: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(db) = args.db {
        config.store.path = db;
    }

    info!("Querying store at {}", config.store.path.display());

    let locator = PointLocator::new(DiskStoreConfig::existing(config.store.path.clone()));
    let found = locator
        .locate(args.latitude, args.longitude)
        .with_context(|| format!("Lookup failed against {}", config.store.path.display()))?;

    match found {
        Some(name) => println!("{}", name),
        None => println!(
            "No region contains ({}, {})",
            args.latitude, args.longitude
        ),
    }

    Ok(())
}
