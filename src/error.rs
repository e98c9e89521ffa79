//! Fatal error types. Per-record problems are not errors; see
//! [`crate::normalize::SkipDiagnostic`].

use std::path::PathBuf;

use crate::models::RegionId;

/// Failures of the spatial store. All of them abort an ingest run.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open spatial store at {}: {source}", .path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: sled::Error,
    },
    #[error("spatial store write failed: {0}")]
    Write(#[source] sled::Error),
    #[error("spatial store read failed: {0}")]
    Read(#[source] sled::Error),
    #[error("region id {0} already exists")]
    DuplicateId(RegionId),
    #[error("no numeric region id left after {0}")]
    IdSpaceExhausted(i64),
    #[error("failed to encode region {id}: {source}")]
    Encode {
        id: RegionId,
        #[source]
        source: serde_json::Error,
    },
    #[error("corrupt entry {key} in {tree}: {reason}")]
    Corrupt {
        tree: &'static str,
        key: String,
        reason: String,
    },
    #[error("store holds SRID {found}, expected {expected}")]
    SridMismatch { expected: u32, found: u32 },
}

/// Failures reading raw features
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
