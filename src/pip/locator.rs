//! Coordinate to region name lookup.

use tracing::debug;

use crate::error::StoreError;
use crate::models::Coordinate;
use crate::store::{Connect, DiskStoreConfig, GeometrySpatialStore};

/// Point-in-polygon lookup against a persisted store.
///
/// Every call opens its own connection, runs one containment query and
/// releases the connection. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct PointLocator<C> {
    connector: C,
}

impl<C: Connect> PointLocator<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Region containing `(latitude, longitude)`, or `None`.
    ///
    /// Arguments are latitude first; the store is queried as
    /// (longitude, latitude).
    pub fn locate(&self, latitude: f64, longitude: f64) -> Result<Option<String>, StoreError> {
        self.locate_coordinate(Coordinate::new(latitude, longitude))
    }

    pub fn locate_coordinate(&self, coordinate: Coordinate) -> Result<Option<String>, StoreError> {
        let store = self.connector.connect()?;
        let (x, y) = coordinate.to_xy();
        let found = store.contains_point(x, y)?;

        debug!(
            "PIP lookup at lat={}, lon={}: {:?}",
            coordinate.latitude, coordinate.longitude, found
        );

        Ok(found)
    }

}

/// One-shot lookup against an existing on-disk store. A missing store is
/// a connection error, never an empty answer.
pub fn locate(
    db: &DiskStoreConfig,
    latitude: f64,
    longitude: f64,
) -> Result<Option<String>, StoreError> {
    PointLocator::new(DiskStoreConfig::existing(db.path.clone())).locate(latitude, longitude)
}
