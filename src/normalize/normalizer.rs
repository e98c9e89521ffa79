//! Canonicalization of candidate geometries.

use geo::{Geometry, HasDimensions, MultiPolygon};
use tracing::{debug, info};

use super::{
    geometry_type_name, GeoEngine, GeometryEngine, RepairRecord, SkipDiagnostic, SkipReason, Stage,
};

/// A geometry accepted for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub geometry: MultiPolygon<f64>,
    /// Present when the input was invalid and had to be repaired
    pub repair: Option<RepairRecord>,
}

/// Validates and repairs candidate geometries.
///
/// Steps, in order: type gate (Polygon is promoted, other non-polygon
/// types rejected), validity check with zero-buffer repair, post-repair
/// viability, type drift check. Valid input is returned untouched.
#[derive(Debug, Clone, Default)]
pub struct GeometryNormalizer<E = GeoEngine> {
    engine: E,
}

impl GeometryNormalizer<GeoEngine> {
    pub fn new() -> Self {
        Self { engine: GeoEngine }
    }
}

impl<E: GeometryEngine> GeometryNormalizer<E> {
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Normalize one candidate. `name` is only used for diagnostics.
    pub fn normalize(&self, name: &str, raw: Geometry<f64>) -> Result<Normalized, SkipDiagnostic> {
        let multi = match raw {
            Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
            Geometry::MultiPolygon(mp) => mp,
            other => {
                return Err(SkipDiagnostic::new(
                    SkipReason::UnsupportedGeometryType,
                    name,
                    Stage::TypeGate,
                )
                .with_detail(geometry_type_name(&other)));
            }
        };

        let candidate = Geometry::MultiPolygon(multi);

        let (result, repair) = if self.engine.is_valid(&candidate) {
            debug!("{}: geometry valid, no repair needed", name);
            (candidate, None)
        } else {
            let before_reason = self.engine.explain_validity(&candidate);
            info!(
                "Before repair: {}, type = MultiPolygon, valid = false, reason = {}",
                name, before_reason
            );

            let repaired = self.engine.buffer_zero(&candidate);
            let after_valid = self.engine.is_valid(&repaired);
            info!(
                "After repair: {}, type = {}, valid = {}",
                name,
                geometry_type_name(&repaired),
                after_valid
            );

            let record = RepairRecord {
                name: name.to_string(),
                before_valid: false,
                before_reason,
                after_valid,
                after_type: geometry_type_name(&repaired).to_string(),
            };
            (repaired, Some(record))
        };

        if result.is_empty() {
            return Err(SkipDiagnostic::new(
                SkipReason::InvalidGeometryUnrepairable,
                name,
                Stage::Repair,
            )
            .with_detail("empty geometry"));
        }
        if repair.as_ref().is_some_and(|r| !r.after_valid) {
            return Err(SkipDiagnostic::new(
                SkipReason::InvalidGeometryUnrepairable,
                name,
                Stage::Repair,
            )
            .with_detail(self.engine.explain_validity(&result)));
        }

        let geometry = match result {
            Geometry::MultiPolygon(mp) => mp,
            Geometry::Polygon(p) => {
                debug!("{}: repair produced a Polygon, promoting", name);
                MultiPolygon::new(vec![p])
            }
            other => {
                return Err(SkipDiagnostic::new(
                    SkipReason::TypeDriftAfterRepair,
                    name,
                    Stage::TypeDrift,
                )
                .with_detail(geometry_type_name(&other)));
            }
        };

        Ok(Normalized { geometry, repair })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point, polygon, Area, LineString, Polygon, Validation};

    fn unit_square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 1.0),
            (x: 1.0, y: 1.0),
            (x: 1.0, y: 0.0),
            (x: 0.0, y: 0.0),
        ]
    }

    fn bowtie() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 1.0, y: 0.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ]
    }

    /// Reports every MultiPolygon invalid and "repairs" to a fixed geometry
    struct FixedRepair(Geometry<f64>);

    impl GeometryEngine for FixedRepair {
        fn is_valid(&self, geometry: &Geometry<f64>) -> bool {
            !matches!(geometry, Geometry::MultiPolygon(_))
        }

        fn explain_validity(&self, _geometry: &Geometry<f64>) -> String {
            "forced".to_string()
        }

        fn buffer_zero(&self, _geometry: &Geometry<f64>) -> Geometry<f64> {
            self.0.clone()
        }
    }

    #[test]
    fn test_polygon_promoted() {
        let out = GeometryNormalizer::new()
            .normalize("TaipeiDaan", Geometry::Polygon(unit_square()))
            .unwrap();
        assert_eq!(out.geometry.0.len(), 1);
        assert!(out.geometry.is_valid());
        assert!(out.repair.is_none());
    }

    #[test]
    fn test_valid_input_untouched() {
        let input = MultiPolygon::new(vec![unit_square()]);
        let out = GeometryNormalizer::new()
            .normalize("TaipeiDaan", Geometry::MultiPolygon(input.clone()))
            .unwrap();
        assert_eq!(out.geometry, input);
        assert!(out.repair.is_none());
    }

    #[test]
    fn test_bowtie_repaired() {
        assert!(!bowtie().is_valid());

        let out = GeometryNormalizer::new()
            .normalize("Bowtie", Geometry::Polygon(bowtie()))
            .unwrap();

        assert!(out.geometry.is_valid());
        assert!(out.geometry.unsigned_area() > 0.0);

        let record = out.repair.unwrap();
        assert!(!record.before_valid);
        assert!(record.after_valid);
        assert_eq!(record.after_type, "MultiPolygon");
        assert_eq!(record.name, "Bowtie");
    }

    #[test]
    fn test_point_unsupported() {
        let err = GeometryNormalizer::new()
            .normalize("Lighthouse", Geometry::Point(point!(x: 121.0, y: 25.0)))
            .unwrap_err();
        assert_eq!(err.reason, SkipReason::UnsupportedGeometryType);
        assert_eq!(err.stage, Stage::TypeGate);
        assert_eq!(err.name, "Lighthouse");
        assert_eq!(err.detail.as_deref(), Some("Point"));
    }

    #[test]
    fn test_line_unsupported() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)];
        let err = GeometryNormalizer::new()
            .normalize("Road", Geometry::LineString(line))
            .unwrap_err();
        assert_eq!(err.reason, SkipReason::UnsupportedGeometryType);
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = GeometryNormalizer::new()
            .normalize("Nothing", Geometry::MultiPolygon(MultiPolygon::new(vec![])))
            .unwrap_err();
        assert_eq!(err.reason, SkipReason::InvalidGeometryUnrepairable);
    }

    #[test]
    fn test_repair_to_empty_is_unrepairable() {
        let normalizer =
            GeometryNormalizer::with_engine(FixedRepair(Geometry::MultiPolygon(MultiPolygon::new(vec![]))));
        let err = normalizer
            .normalize("Sliver", Geometry::Polygon(unit_square()))
            .unwrap_err();
        assert_eq!(err.reason, SkipReason::InvalidGeometryUnrepairable);
        assert_eq!(err.stage, Stage::Repair);
        assert_eq!(err.detail.as_deref(), Some("empty geometry"));
    }

    #[test]
    fn test_repair_still_invalid_is_unrepairable() {
        // FixedRepair reports any MultiPolygon as invalid
        let normalizer = GeometryNormalizer::with_engine(FixedRepair(Geometry::MultiPolygon(
            MultiPolygon::new(vec![unit_square()]),
        )));
        let err = normalizer
            .normalize("Stubborn", Geometry::Polygon(unit_square()))
            .unwrap_err();
        assert_eq!(err.reason, SkipReason::InvalidGeometryUnrepairable);
        assert_eq!(err.detail.as_deref(), Some("forced"));
    }

    #[test]
    fn test_drift_to_polygon_promoted() {
        let normalizer = GeometryNormalizer::with_engine(FixedRepair(Geometry::Polygon(unit_square())));
        let out = normalizer
            .normalize("Drifted", Geometry::Polygon(bowtie()))
            .unwrap();
        assert_eq!(out.geometry, MultiPolygon::new(vec![unit_square()]));
        assert_eq!(out.repair.unwrap().after_type, "Polygon");
    }

    #[test]
    fn test_drift_to_line_rejected() {
        let line: LineString<f64> = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)];
        let normalizer = GeometryNormalizer::with_engine(FixedRepair(Geometry::LineString(line)));
        let err = normalizer
            .normalize("Collapsed", Geometry::Polygon(bowtie()))
            .unwrap_err();
        assert_eq!(err.reason, SkipReason::TypeDriftAfterRepair);
        assert_eq!(err.stage, Stage::TypeDrift);
        assert_eq!(err.detail.as_deref(), Some("LineString"));
    }
}
