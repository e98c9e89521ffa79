//! GeoJSON input records.
//!
//! Only the parts of a feature the loader needs are modelled. Unknown
//! property keys are ignored. Geometry is kept as raw JSON at collection
//! level and parsed per record, so one malformed geometry cannot fail the
//! whole collection. Unknown geometry types deserialize to
//! [`RawGeometry::Unknown`].

use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use serde::Deserialize;

/// A GeoJSON position: `[longitude, latitude, (altitude)...]`
pub type Position = Vec<f64>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeature {
    /// Feature id as found in the file (number or string)
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    #[serde(default)]
    pub properties: Option<FeatureProperties>,

    /// Unparsed geometry object; `null` geometries are legal GeoJSON
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
}

/// Naming properties of a township boundary feature
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeatureProperties {
    #[serde(rename = "COUNTYNAME", default)]
    pub county_name: Option<String>,

    #[serde(rename = "TOWNNAME", default)]
    pub town_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum RawGeometry {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<RawGeometry>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryParseError {
    #[error("unsupported geometry type: {0}")]
    Unsupported(String),
    #[error("position has {0} ordinate(s), need at least 2")]
    MalformedPosition(usize),
    #[error("malformed geometry object: {0}")]
    Malformed(String),
}

impl RawGeometry {
    /// Parse a GeoJSON geometry object
    pub fn from_json(value: &serde_json::Value) -> Result<Self, GeometryParseError> {
        RawGeometry::deserialize(value).map_err(|e| GeometryParseError::Malformed(e.to_string()))
    }

    /// Convert into a `geo` geometry. Altitude is dropped; rings are closed
    /// by `Polygon::new`. No validity checks happen here.
    pub fn to_geometry(&self) -> Result<Geometry<f64>, GeometryParseError> {
        let geometry = match self {
            RawGeometry::Point { coordinates } => Geometry::Point(Point::from(coord(coordinates)?)),
            RawGeometry::MultiPoint { coordinates } => Geometry::MultiPoint(MultiPoint::new(
                coordinates
                    .iter()
                    .map(|p| coord(p).map(Point::from))
                    .collect::<Result<_, _>>()?,
            )),
            RawGeometry::LineString { coordinates } => Geometry::LineString(line(coordinates)?),
            RawGeometry::MultiLineString { coordinates } => {
                Geometry::MultiLineString(MultiLineString::new(
                    coordinates
                        .iter()
                        .map(|l| line(l))
                        .collect::<Result<_, _>>()?,
                ))
            }
            RawGeometry::Polygon { coordinates } => Geometry::Polygon(polygon(coordinates)?),
            RawGeometry::MultiPolygon { coordinates } => {
                Geometry::MultiPolygon(MultiPolygon::new(
                    coordinates
                        .iter()
                        .map(|rings| polygon(rings))
                        .collect::<Result<_, _>>()?,
                ))
            }
            RawGeometry::GeometryCollection { geometries } => {
                Geometry::GeometryCollection(GeometryCollection::new_from(
                    geometries
                        .iter()
                        .map(RawGeometry::to_geometry)
                        .collect::<Result<_, _>>()?,
                ))
            }
            RawGeometry::Unknown => {
                return Err(GeometryParseError::Unsupported("Unknown".to_string()))
            }
        };
        Ok(geometry)
    }
}

fn coord(position: &[f64]) -> Result<Coord<f64>, GeometryParseError> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(GeometryParseError::MalformedPosition(position.len())),
    }
}

fn line(positions: &[Position]) -> Result<LineString<f64>, GeometryParseError> {
    positions
        .iter()
        .map(|p| coord(p))
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn polygon(rings: &[Vec<Position>]) -> Result<Polygon<f64>, GeometryParseError> {
    let mut rings = rings.iter().map(|r| line(r));
    let exterior = rings
        .next()
        .transpose()?
        .unwrap_or_else(|| LineString::new(vec![]));
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}
