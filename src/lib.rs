//! Banyan - administrative boundary ingest and point-in-polygon lookup
//!
//! This library provides the pipeline and store shared by the ingest and locate binaries.

pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod pip;
pub mod pipeline;
pub mod source;
pub mod store;

pub use error::{IngestError, SourceError, StoreError};
pub use models::{Coordinate, Region, RegionId};
pub use pip::{locate, PointLocator};
pub use pipeline::{IngestReport, Ingestor};
pub use store::{DiskStore, DiskStoreConfig, GeometrySpatialStore};
