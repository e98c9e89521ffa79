//! Point-in-Polygon (PIP) region lookup.
//!
//! Translates caller coordinates (latitude first) into containment
//! queries against a persisted [`GeometrySpatialStore`](crate::store::GeometrySpatialStore).

mod locator;

pub use locator::{locate, PointLocator};
