//! Core data models for boundary ingestion and lookup.

pub mod feature;
pub mod region;

pub use feature::{FeatureCollection, FeatureProperties, GeometryParseError, RawFeature, RawGeometry};
pub use region::{Coordinate, Region, RegionId, SRID_WGS84, UNNAMED};
