//! Durable region storage with a spatial index.
//!
//! [`GeometrySpatialStore`] is the contract the ingest pipeline and the
//! locator depend on; [`DiskStore`] is its sled-backed implementation.

mod disk;
mod index;

pub use disk::{DiskStore, DiskStoreConfig, IDS_TREE, INDEX_TREE, ROWS_TREE, SITE_EFFECTS_TREE};
pub use index::{envelope_of, IndexedRegion, RegionIndex};

use geo::MultiPolygon;

use crate::error::StoreError;
use crate::models::RegionId;

pub trait GeometrySpatialStore {
    /// Stage one region (SRID 4326). Nothing is durable until [`commit`].
    /// Returns the given id, or a store-assigned one when `id` is `None`.
    ///
    /// [`commit`]: GeometrySpatialStore::commit
    fn insert(
        &mut self,
        id: Option<RegionId>,
        name: &str,
        geometry: &MultiPolygon<f64>,
    ) -> Result<RegionId, StoreError>;

    /// Persist every staged region at once. Returns the number written.
    fn commit(&mut self) -> Result<usize, StoreError>;

    /// (Re)build the spatial index over all committed regions. Idempotent.
    fn build_index(&mut self) -> Result<(), StoreError>;

    /// Name of a region covering the point, boundary included.
    ///
    /// When regions overlap, the one inserted first wins.
    fn contains_point(&self, longitude: f64, latitude: f64) -> Result<Option<String>, StoreError>;
}

/// Opens a fresh, scoped store handle. The handle is released when dropped.
pub trait Connect {
    type Store: GeometrySpatialStore;

    fn connect(&self) -> Result<Self::Store, StoreError>;
}
