//! R-tree over region envelopes.

use geo::{BoundingRect, MultiPolygon};
use rstar::{RTree, RTreeObject, AABB};
use tracing::debug;

/// Envelope of one stored region, keyed by its row sequence
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRegion {
    pub seq: u64,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedRegion {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedRegion {
    pub fn new(seq: u64, envelope: AABB<[f64; 2]>) -> Self {
        Self { seq, envelope }
    }

    /// `[min_lon, min_lat, max_lon, max_lat]`
    pub fn bounds(&self) -> [f64; 4] {
        let lower = self.envelope.lower();
        let upper = self.envelope.upper();
        [lower[0], lower[1], upper[0], upper[1]]
    }

    pub fn from_bounds(seq: u64, bounds: [f64; 4]) -> Self {
        Self::new(
            seq,
            AABB::from_corners([bounds[0], bounds[1]], [bounds[2], bounds[3]]),
        )
    }
}

/// Bounding box of a geometry, `None` when it has no coordinates
pub fn envelope_of(geometry: &MultiPolygon<f64>) -> Option<AABB<[f64; 2]>> {
    geometry
        .bounding_rect()
        .map(|rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]))
}

/// Spatial index for regions using R-tree
#[derive(Debug)]
pub struct RegionIndex {
    tree: RTree<IndexedRegion>,
}

impl RegionIndex {
    pub fn build(entries: Vec<IndexedRegion>) -> Self {
        let tree = RTree::bulk_load(entries);
        debug!("Region index loaded with {} entries", tree.size());
        Self { tree }
    }

    /// Row sequences whose envelope covers the point, ascending.
    ///
    /// Candidates still need an exact geometry test.
    pub fn candidates(&self, lon: f64, lat: f64) -> Vec<u64> {
        let query_envelope = AABB::from_point([lon, lat]);

        let mut seqs: Vec<u64> = self
            .tree
            .locate_in_envelope_intersecting(&query_envelope)
            .map(|ir| ir.seq)
            .collect();
        seqs.sort_unstable();
        seqs
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
