//! Region types persisted by the spatial store.

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spatial reference of every stored geometry (WGS84 longitude/latitude)
pub const SRID_WGS84: u32 = 4326;

/// Substitute for a missing county or town name
pub const UNNAMED: &str = "unnamed";

/// Stable region identifier, taken from the input feature or assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionId {
    Number(i64),
    Text(String),
}

impl RegionId {
    /// Primary-key bytes. Numbers and strings live in separate key spaces,
    /// so `1` and `"1"` are distinct ids.
    pub fn key(&self) -> Vec<u8> {
        match self {
            RegionId::Number(n) => format!("n:{}", n).into_bytes(),
            RegionId::Text(s) => format!("s:{}", s).into_bytes(),
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            RegionId::Number(n) => Some(*n),
            RegionId::Text(_) => None,
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionId::Number(n) => write!(f, "{}", n),
            RegionId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RegionId {
    fn from(n: i64) -> Self {
        RegionId::Number(n)
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        RegionId::Text(s.to_string())
    }
}

impl From<String> for RegionId {
    fn from(s: String) -> Self {
        RegionId::Text(s)
    }
}

/// A named boundary as stored: always a valid, non-empty polygon collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub srid: u32,
    pub geometry: MultiPolygon<f64>,
}

/// Caller-facing coordinate. Latitude comes first here, while geometries
/// and the store work in (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Store-native order: (longitude, latitude)
    pub fn to_xy(self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }
}
