//! Geometry validation and repair.
//!
//! Every candidate geometry is pushed into the canonical `MultiPolygon`
//! form before it may be stored, or rejected with a [`SkipDiagnostic`].

mod diagnostic;
mod engine;
mod normalizer;

pub use diagnostic::{RepairRecord, SkipDiagnostic, SkipReason, Stage};
pub use engine::{GeoEngine, GeometryEngine};
pub use normalizer::{GeometryNormalizer, Normalized};

use geo::Geometry;

/// OGC type name of a geometry, used in diagnostics
pub fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
