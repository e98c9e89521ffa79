//! Ingest pipeline: source -> loader -> normalizer -> store.
//!
//! Records are processed one at a time on a single connection. Inserts
//! are staged and committed together after the loop, then the spatial
//! index is built. A bad geometry skips its record; a store or source
//! failure aborts the run and nothing from it is persisted.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::IngestError;
use crate::loader::FeatureLoader;
use crate::normalize::{GeoEngine, GeometryEngine, GeometryNormalizer, RepairRecord, SkipDiagnostic, SkipReason};
use crate::source::FeatureSource;
use crate::store::{Connect, GeometrySpatialStore};

/// Outcome of one ingest run, for data-quality review
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub processed: usize,
    pub inserted: usize,
    pub repaired: Vec<RepairRecord>,
    pub skipped: Vec<SkipDiagnostic>,
}

impl IngestReport {
    fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            processed: 0,
            inserted: 0,
            repaired: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn skip(&mut self, diagnostic: SkipDiagnostic) {
        warn!("{}", diagnostic);
        self.skipped.push(diagnostic);
    }

    /// Number of skipped records with the given reason
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|d| d.reason == reason).count()
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .context("Failed to write ingest report")?;
        Ok(())
    }
}

pub struct Ingestor<E = GeoEngine> {
    loader: FeatureLoader,
    normalizer: GeometryNormalizer<E>,
    progress: ProgressBar,
}

impl Ingestor<GeoEngine> {
    pub fn new() -> Self {
        Self::with_engine(GeoEngine)
    }
}

impl Default for Ingestor<GeoEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GeometryEngine> Ingestor<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            loader: FeatureLoader::new(),
            normalizer: GeometryNormalizer::with_engine(engine),
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress on the given bar (hidden by default)
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Ingest every record of `source` into a store opened from `connector`.
    pub fn run<S, C>(&self, source: &mut S, connector: &C) -> Result<IngestReport, IngestError>
    where
        S: FeatureSource,
        C: Connect,
    {
        let mut report = IngestReport::new(Utc::now());
        let mut store = connector.connect()?;

        if let Some(len) = source.len_hint() {
            self.progress.set_length(len as u64);
        }

        info!("Processing features...");

        while let Some(feature) = source.next_feature() {
            let feature = feature?;
            self.progress.inc(1);
            report.processed += 1;

            let candidate = match self.loader.load(&feature) {
                Ok(c) => c,
                Err(diagnostic) => {
                    report.skip(diagnostic);
                    continue;
                }
            };

            match self
                .normalizer
                .normalize(&candidate.name, candidate.raw_geometry)
            {
                Ok(normalized) => {
                    if let Some(repair) = normalized.repair {
                        report.repaired.push(repair);
                    }
                    store.insert(candidate.id, &candidate.name, &normalized.geometry)?;
                }
                Err(diagnostic) => report.skip(diagnostic),
            }
        }

        report.inserted = store.commit()?;
        store.build_index()?;
        drop(store);

        self.progress.finish_with_message("Processing complete");
        report.finished_at = Some(Utc::now());

        info!(
            "Ingested {} of {} features ({} repaired, {} skipped)",
            report.inserted,
            report.processed,
            report.repaired.len(),
            report.skipped.len()
        );

        Ok(report)
    }
}
