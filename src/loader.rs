//! Candidate extraction from raw features.

use geo::Geometry;
use serde_json::Value;

use crate::models::{GeometryParseError, RawFeature, RawGeometry, RegionId, UNNAMED};
use crate::normalize::{SkipDiagnostic, SkipReason, Stage};

/// One input record reduced to what the normalizer and store need
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: Option<RegionId>,
    pub name: String,
    pub raw_geometry: Geometry<f64>,
}

/// Pure extraction: naming, id and geometry parsing. No validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureLoader;

impl FeatureLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, feature: &RawFeature) -> Result<Candidate, SkipDiagnostic> {
        let name = region_name(feature);

        let raw_geometry = match &feature.geometry {
            Some(value) if !value.is_null() => RawGeometry::from_json(value)
                .and_then(|raw| raw.to_geometry())
                .map_err(|e| {
                    let reason = match e {
                        GeometryParseError::Unsupported(_) => SkipReason::UnsupportedGeometryType,
                        GeometryParseError::MalformedPosition(_) | GeometryParseError::Malformed(_) => {
                            SkipReason::MalformedGeometry
                        }
                    };
                    SkipDiagnostic::new(reason, name.as_str(), Stage::Load).with_detail(e.to_string())
                })?,
            _ => {
                return Err(SkipDiagnostic::new(
                    SkipReason::UnsupportedGeometryType,
                    name,
                    Stage::Load,
                )
                .with_detail("null"))
            }
        };

        Ok(Candidate {
            id: feature.id.as_ref().and_then(feature_id),
            name,
            raw_geometry,
        })
    }
}

/// `county ++ town`, each part defaulting to "unnamed" on its own
pub fn region_name(feature: &RawFeature) -> String {
    let props = feature.properties.clone().unwrap_or_default();
    let county = props.county_name.unwrap_or_else(|| UNNAMED.to_string());
    let town = props.town_name.unwrap_or_else(|| UNNAMED.to_string());
    county + &town
}

/// Integers stay numeric; other numbers and non-empty strings become text
/// ids. Empty strings and other JSON values mean "no id".
fn feature_id(value: &Value) -> Option<RegionId> {
    match value {
        Value::Number(n) => Some(
            n.as_i64()
                .map(RegionId::Number)
                .unwrap_or_else(|| RegionId::Text(n.to_string())),
        ),
        Value::String(s) if !s.is_empty() => Some(RegionId::Text(s.clone())),
        _ => None,
    }
}
