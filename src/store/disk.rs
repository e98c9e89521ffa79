//! sled-backed spatial store.
//!
//! Layout, one sled tree per table:
//! - `town_boundaries`: row sequence (u64 BE) -> JSON [`Region`]
//! - `town_boundaries_ids`: [`RegionId::key`] -> row sequence
//! - `town_boundaries_rtree`: row sequence -> envelope (4 x f64 BE)
//! - `site_effects`: declared for the surrounding system, never written
//! - `metadata`: SRID, sequence counters and the index watermark
//!
//! Row sequences grow with insertion order, which is what makes
//! "first inserted wins" hold for overlapping regions.

use std::cell::OnceCell;
use std::io;
use std::path::{Path, PathBuf};

use geo::{Intersects, MultiPolygon, Point};
use hashbrown::HashSet;
use sled::transaction::{ConflictableTransactionError, TransactionError, TransactionResult};
use sled::{Batch, Db, Transactional, Tree};
use tracing::{debug, info};

use super::{envelope_of, Connect, GeometrySpatialStore, IndexedRegion, RegionIndex};
use crate::error::StoreError;
use crate::models::{Region, RegionId, SRID_WGS84};

pub const ROWS_TREE: &str = "town_boundaries";
pub const IDS_TREE: &str = "town_boundaries_ids";
pub const INDEX_TREE: &str = "town_boundaries_rtree";
pub const SITE_EFFECTS_TREE: &str = "site_effects";
const METADATA_TREE: &str = "metadata";

const META_SRID: &[u8] = b"srid";
const META_NEXT_SEQ: &[u8] = b"next_seq";
const META_MAX_NUMERIC_ID: &[u8] = b"max_numeric_id";
/// Rows with a sequence below this are covered by the index tree
const META_INDEXED_UPTO: &[u8] = b"indexed_upto";

/// Location of an on-disk store; each [`Connect::connect`] opens a new handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskStoreConfig {
    pub path: PathBuf,
    /// Create the store when it does not exist yet
    pub create: bool,
}

impl DiskStoreConfig {
    /// Store that is created on first connect (ingest)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create: true,
        }
    }

    /// Store that must already exist (queries)
    pub fn existing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create: false,
        }
    }
}

impl Connect for DiskStoreConfig {
    type Store = DiskStore;

    fn connect(&self) -> Result<DiskStore, StoreError> {
        if self.create {
            DiskStore::open(&self.path)
        } else {
            DiskStore::open_existing(&self.path)
        }
    }
}

/// One open connection to the store. sled holds an exclusive lock on the
/// directory until the handle is dropped.
pub struct DiskStore {
    db: Db,
    rows: Tree,
    ids: Tree,
    index: Tree,
    metadata: Tree,
    next_seq: u64,
    max_numeric_id: i64,
    staged: Vec<(u64, Region)>,
    staged_ids: HashSet<RegionId>,
    loaded_index: OnceCell<RegionIndex>,
}

impl DiskStore {
    /// Open the store at `path`, creating it if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::open_with(path.as_ref(), true)
    }

    /// Open a store previously created by [`DiskStore::open`]. Nothing is
    /// created on disk when `path` is missing.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(StoreError::Connection {
                path: path.to_path_buf(),
                source: sled::Error::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    "no store directory",
                )),
            });
        }
        Self::open_with(path, false)
    }

    fn open_with(path: &Path, create: bool) -> Result<Self, StoreError> {
        let db = sled::open(path).map_err(|source| StoreError::Connection {
            path: path.to_path_buf(),
            source,
        })?;

        let metadata = db.open_tree(METADATA_TREE).map_err(StoreError::Write)?;
        match read_word(&metadata, META_SRID)?.map(u64::from_be_bytes) {
            Some(found) if found != u64::from(SRID_WGS84) => {
                return Err(StoreError::SridMismatch {
                    expected: SRID_WGS84,
                    found: u32::try_from(found).unwrap_or(u32::MAX),
                });
            }
            Some(_) => {}
            None if create => {
                metadata
                    .insert(META_SRID, &u64::from(SRID_WGS84).to_be_bytes()[..])
                    .map_err(StoreError::Write)?;
            }
            None => {
                return Err(StoreError::Connection {
                    path: path.to_path_buf(),
                    source: sled::Error::Unsupported(
                        "no srid recorded, not a boundary store".to_string(),
                    ),
                });
            }
        }

        let rows = db.open_tree(ROWS_TREE).map_err(StoreError::Write)?;
        let ids = db.open_tree(IDS_TREE).map_err(StoreError::Write)?;
        let index = db.open_tree(INDEX_TREE).map_err(StoreError::Write)?;
        db.open_tree(SITE_EFFECTS_TREE).map_err(StoreError::Write)?;

        let next_seq = read_word(&metadata, META_NEXT_SEQ)?
            .map(u64::from_be_bytes)
            .unwrap_or(0);
        let max_numeric_id = read_word(&metadata, META_MAX_NUMERIC_ID)?
            .map(i64::from_be_bytes)
            .unwrap_or(0);

        debug!(
            "Opened spatial store at {} ({} regions)",
            path.display(),
            rows.len()
        );

        Ok(Self {
            db,
            rows,
            ids,
            index,
            metadata,
            next_seq,
            max_numeric_id,
            staged: Vec::new(),
            staged_ids: HashSet::new(),
            loaded_index: OnceCell::new(),
        })
    }

    /// Number of committed regions
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of regions waiting for [`GeometrySpatialStore::commit`]
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Committed region by id
    pub fn get(&self, id: &RegionId) -> Result<Option<Region>, StoreError> {
        let Some(seq) = self.ids.get(id.key()).map_err(StoreError::Read)? else {
            return Ok(None);
        };
        match self.rows.get(&seq).map_err(StoreError::Read)? {
            Some(value) => decode_row(&seq, &value).map(Some),
            None => Ok(None),
        }
    }

    /// All committed regions in insertion order
    pub fn regions(&self) -> Result<Vec<Region>, StoreError> {
        let mut regions = Vec::with_capacity(self.rows.len());
        for entry in self.rows.iter() {
            let (key, value) = entry.map_err(StoreError::Read)?;
            regions.push(decode_row(&key, &value)?);
        }
        Ok(regions)
    }

    fn region_index(&self) -> Result<&RegionIndex, StoreError> {
        if let Some(index) = self.loaded_index.get() {
            return Ok(index);
        }

        let mut entries = Vec::with_capacity(self.index.len());
        for entry in self.index.iter() {
            let (key, value) = entry.map_err(StoreError::Read)?;
            entries.push(IndexedRegion::from_bounds(
                decode_seq(INDEX_TREE, &key)?,
                decode_bounds(&key, &value)?,
            ));
        }
        Ok(self.loaded_index.get_or_init(|| RegionIndex::build(entries)))
    }
}

impl GeometrySpatialStore for DiskStore {
    fn insert(
        &mut self,
        id: Option<RegionId>,
        name: &str,
        geometry: &MultiPolygon<f64>,
    ) -> Result<RegionId, StoreError> {
        let id = match id {
            Some(id) => {
                if self.staged_ids.contains(&id)
                    || self.ids.contains_key(id.key()).map_err(StoreError::Read)?
                {
                    return Err(StoreError::DuplicateId(id));
                }
                id
            }
            None => RegionId::Number(
                self.max_numeric_id
                    .checked_add(1)
                    .ok_or(StoreError::IdSpaceExhausted(self.max_numeric_id))?,
            ),
        };

        if let Some(n) = id.as_number() {
            self.max_numeric_id = self.max_numeric_id.max(n);
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        debug!("Staged region {} ({}) as row {}", id, name, seq);

        self.staged_ids.insert(id.clone());
        self.staged.push((
            seq,
            Region {
                id: id.clone(),
                name: name.to_string(),
                srid: SRID_WGS84,
                geometry: geometry.clone(),
            },
        ));

        Ok(id)
    }

    fn commit(&mut self) -> Result<usize, StoreError> {
        if self.staged.is_empty() {
            return Ok(0);
        }

        let mut encoded = Vec::with_capacity(self.staged.len());
        for (seq, region) in &self.staged {
            let row = serde_json::to_vec(region).map_err(|source| StoreError::Encode {
                id: region.id.clone(),
                source,
            })?;
            encoded.push((seq.to_be_bytes(), &region.id, row));
        }
        let next_seq = self.next_seq.to_be_bytes();
        let max_numeric_id = self.max_numeric_id.to_be_bytes();

        let result: TransactionResult<(), StoreError> = (&self.rows, &self.ids, &self.metadata)
            .transaction(|(rows, ids, metadata)| {
                for (seq, id, row) in &encoded {
                    if ids.get(id.key())?.is_some() {
                        return Err(ConflictableTransactionError::Abort(StoreError::DuplicateId(
                            (*id).clone(),
                        )));
                    }
                    rows.insert(&seq[..], row.as_slice())?;
                    ids.insert(id.key(), &seq[..])?;
                }
                metadata.insert(META_NEXT_SEQ, &next_seq[..])?;
                metadata.insert(META_MAX_NUMERIC_ID, &max_numeric_id[..])?;
                Ok(())
            });

        result.map_err(|e| match e {
            TransactionError::Abort(e) => e,
            TransactionError::Storage(e) => StoreError::Write(e),
        })?;
        self.db.flush().map_err(StoreError::Write)?;

        let written = self.staged.len();
        self.staged.clear();
        self.staged_ids.clear();

        info!("Committed {} regions", written);
        Ok(written)
    }

    fn build_index(&mut self) -> Result<(), StoreError> {
        let mut batch = Batch::default();
        for key in self.index.iter().keys() {
            batch.remove(key.map_err(StoreError::Read)?);
        }

        let mut indexed = 0usize;
        let mut indexed_upto = 0u64;
        for entry in self.rows.iter() {
            let (key, value) = entry.map_err(StoreError::Read)?;
            let seq = decode_seq(ROWS_TREE, &key)?;
            indexed_upto = seq + 1;

            let region = decode_row(&key, &value)?;
            if let Some(envelope) = envelope_of(&region.geometry) {
                batch.insert(key, encode_bounds(IndexedRegion::new(seq, envelope).bounds()));
                indexed += 1;
            }
        }

        self.index.apply_batch(batch).map_err(StoreError::Write)?;
        self.metadata
            .insert(META_INDEXED_UPTO, &indexed_upto.to_be_bytes()[..])
            .map_err(StoreError::Write)?;
        self.db.flush().map_err(StoreError::Write)?;
        self.loaded_index = OnceCell::new();

        info!("Spatial index built with {} entries", indexed);
        Ok(())
    }

    fn contains_point(&self, longitude: f64, latitude: f64) -> Result<Option<String>, StoreError> {
        let point = Point::new(longitude, latitude);
        let mut candidates = self.region_index()?.candidates(longitude, latitude);

        // Rows committed after the last index build are not in the R-tree
        let indexed_upto = read_word(&self.metadata, META_INDEXED_UPTO)?
            .map(u64::from_be_bytes)
            .unwrap_or(0);
        for key in self.rows.range(indexed_upto.to_be_bytes()..).keys() {
            candidates.push(decode_seq(ROWS_TREE, &key.map_err(StoreError::Read)?)?);
        }

        candidates.sort_unstable();
        candidates.dedup();

        for seq in candidates {
            let key = seq.to_be_bytes();
            let Some(value) = self.rows.get(key).map_err(StoreError::Read)? else {
                continue;
            };
            let region = decode_row(&key, &value)?;
            if region.geometry.intersects(&point) {
                debug!(
                    "({}, {}) is in {} (row {})",
                    longitude, latitude, region.name, seq
                );
                return Ok(Some(region.name));
            }
        }

        Ok(None)
    }
}

fn read_word(tree: &Tree, key: &[u8]) -> Result<Option<[u8; 8]>, StoreError> {
    match tree.get(key).map_err(StoreError::Read)? {
        Some(bytes) => {
            let word = <[u8; 8]>::try_from(&bytes[..]).map_err(|_| StoreError::Corrupt {
                tree: METADATA_TREE,
                key: String::from_utf8_lossy(key).into_owned(),
                reason: format!("expected 8 bytes, found {}", bytes.len()),
            })?;
            Ok(Some(word))
        }
        None => Ok(None),
    }
}

fn decode_seq(tree: &'static str, key: &[u8]) -> Result<u64, StoreError> {
    <[u8; 8]>::try_from(key)
        .map(u64::from_be_bytes)
        .map_err(|_| StoreError::Corrupt {
            tree,
            key: format!("{:02x?}", key),
            reason: format!("row key has {} bytes, expected 8", key.len()),
        })
}

fn decode_row(key: &[u8], value: &[u8]) -> Result<Region, StoreError> {
    serde_json::from_slice(value).map_err(|e| StoreError::Corrupt {
        tree: ROWS_TREE,
        key: format!("{:02x?}", key),
        reason: e.to_string(),
    })
}

fn encode_bounds(bounds: [f64; 4]) -> Vec<u8> {
    bounds.iter().flat_map(|v| v.to_be_bytes()).collect()
}

fn decode_bounds(key: &[u8], value: &[u8]) -> Result<[f64; 4], StoreError> {
    if value.len() != 32 {
        return Err(StoreError::Corrupt {
            tree: INDEX_TREE,
            key: format!("{:02x?}", key),
            reason: format!("envelope has {} bytes, expected 32", value.len()),
        });
    }
    let mut bounds = [0f64; 4];
    for (i, chunk) in value.chunks_exact(8).enumerate() {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        bounds[i] = f64::from_be_bytes(word);
    }
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Polygon};
    use tempfile::TempDir;

    fn square(x: f64, y: f64, size: f64) -> MultiPolygon<f64> {
        let p: Polygon<f64> = polygon![
            (x: x, y: y),
            (x: x, y: y + size),
            (x: x + size, y: y + size),
            (x: x + size, y: y),
            (x: x, y: y),
        ];
        MultiPolygon::new(vec![p])
    }

    fn open(dir: &TempDir) -> DiskStore {
        DiskStore::open(dir.path().join("regions.db")).unwrap()
    }

    #[test]
    fn test_insert_commit_index_query() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);

        store
            .insert(Some(RegionId::from(1)), "TaipeiDaan", &square(0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(store.staged_len(), 1);
        assert!(store.is_empty());

        assert_eq!(store.commit().unwrap(), 1);
        store.build_index().unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.contains_point(0.5, 0.5).unwrap().as_deref(),
            Some("TaipeiDaan")
        );
        assert_eq!(store.contains_point(50.0, 50.0).unwrap(), None);
    }

    #[test]
    fn test_boundary_is_contained() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.insert(None, "Edge", &square(0.0, 0.0, 1.0)).unwrap();
        store.commit().unwrap();
        store.build_index().unwrap();

        assert_eq!(store.contains_point(1.0, 0.5).unwrap().as_deref(), Some("Edge"));
        assert_eq!(store.contains_point(0.0, 0.0).unwrap().as_deref(), Some("Edge"));
        assert_eq!(store.contains_point(1.0001, 0.5).unwrap(), None);
    }

    #[test]
    fn test_overlap_first_inserted_wins() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        // Larger region first; a smaller region inside it second
        store.insert(Some(RegionId::from(9)), "Outer", &square(0.0, 0.0, 4.0)).unwrap();
        store.insert(Some(RegionId::from(2)), "Inner", &square(1.0, 1.0, 1.0)).unwrap();
        store.commit().unwrap();
        store.build_index().unwrap();

        assert_eq!(store.contains_point(1.5, 1.5).unwrap().as_deref(), Some("Outer"));
        assert_eq!(store.contains_point(3.5, 3.5).unwrap().as_deref(), Some("Outer"));
    }

    #[test]
    fn test_assigned_ids_follow_largest_numeric() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);

        assert_eq!(store.insert(None, "a", &square(0.0, 0.0, 1.0)).unwrap(), RegionId::from(1));
        assert_eq!(
            store.insert(Some(RegionId::from(10)), "b", &square(2.0, 0.0, 1.0)).unwrap(),
            RegionId::from(10)
        );
        assert_eq!(
            store.insert(Some(RegionId::from("T-1")), "c", &square(4.0, 0.0, 1.0)).unwrap(),
            RegionId::from("T-1")
        );
        assert_eq!(store.insert(None, "d", &square(6.0, 0.0, 1.0)).unwrap(), RegionId::from(11));
        store.commit().unwrap();
        drop(store);

        // Counters survive reopening
        let mut store = open(&dir);
        assert_eq!(store.insert(None, "e", &square(8.0, 0.0, 1.0)).unwrap(), RegionId::from(12));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.insert(Some(RegionId::from(5)), "a", &square(0.0, 0.0, 1.0)).unwrap();

        let err = store
            .insert(Some(RegionId::from(5)), "b", &square(0.0, 0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(RegionId::Number(5))));

        store.commit().unwrap();
        let err = store
            .insert(Some(RegionId::from(5)), "c", &square(0.0, 0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(_)));
    }

    #[test]
    fn test_assigned_id_overflow_is_error() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store
            .insert(Some(RegionId::from(i64::MAX)), "Last", &square(0.0, 0.0, 1.0))
            .unwrap();

        let err = store.insert(None, "Next", &square(2.0, 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, StoreError::IdSpaceExhausted(i64::MAX)));
        assert_eq!(store.staged_len(), 1);

        // Text ids do not draw from the numeric counter
        store
            .insert(Some(RegionId::from("T-9")), "Text", &square(4.0, 0.0, 1.0))
            .unwrap();
    }

    #[test]
    fn test_open_existing_missing_path_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("typo.db");

        let err = DiskStore::open_existing(&path).err().unwrap();
        assert!(matches!(err, StoreError::Connection { .. }));
        assert!(!path.exists());

        let err = DiskStoreConfig::existing(&path).connect().err().unwrap();
        assert!(matches!(err, StoreError::Connection { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_existing_requires_srid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty");
        std::fs::create_dir(&path).unwrap();

        let err = DiskStore::open_existing(&path).err().unwrap();
        assert!(matches!(err, StoreError::Connection { .. }));
    }

    #[test]
    fn test_open_existing_after_create() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = open(&dir);
            store.insert(None, "Made", &square(0.0, 0.0, 1.0)).unwrap();
            store.commit().unwrap();
        }

        let store = DiskStore::open_existing(dir.path().join("regions.db")).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.contains_point(0.5, 0.5).unwrap().as_deref(), Some("Made"));
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.insert(None, "Same", &square(0.0, 0.0, 1.0)).unwrap();
        store.insert(None, "Same", &square(5.0, 5.0, 1.0)).unwrap();
        assert_eq!(store.commit().unwrap(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_uncommitted_rows_lost_on_drop() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = open(&dir);
            store.insert(None, "Kept", &square(0.0, 0.0, 1.0)).unwrap();
            store.commit().unwrap();
            store.insert(None, "Lost", &square(5.0, 5.0, 1.0)).unwrap();
        }

        let store = open(&dir);
        assert_eq!(store.len(), 1);
        assert_eq!(store.regions().unwrap()[0].name, "Kept");
        assert_eq!(store.contains_point(5.5, 5.5).unwrap(), None);
    }

    #[test]
    fn test_build_index_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.insert(None, "A", &square(0.0, 0.0, 1.0)).unwrap();
        store.insert(None, "B", &square(2.0, 0.0, 1.0)).unwrap();
        store.commit().unwrap();

        store.build_index().unwrap();
        let first: Vec<_> = store.index.iter().collect::<Result<_, _>>().unwrap();
        store.build_index().unwrap();
        let second: Vec<_> = store.index.iter().collect::<Result<_, _>>().unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(store.contains_point(2.5, 0.5).unwrap().as_deref(), Some("B"));
    }

    #[test]
    fn test_rows_after_index_still_found() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.insert(None, "Indexed", &square(0.0, 0.0, 1.0)).unwrap();
        store.commit().unwrap();
        store.build_index().unwrap();

        store.insert(None, "Late", &square(3.0, 3.0, 1.0)).unwrap();
        store.commit().unwrap();

        assert_eq!(store.contains_point(3.5, 3.5).unwrap().as_deref(), Some("Late"));
        assert_eq!(store.contains_point(0.5, 0.5).unwrap().as_deref(), Some("Indexed"));
    }

    #[test]
    fn test_query_without_index() {
        let dir = TempDir::new().unwrap();
        let mut store = open(&dir);
        store.insert(None, "NoIndex", &square(0.0, 0.0, 1.0)).unwrap();
        store.commit().unwrap();
        assert_eq!(store.contains_point(0.5, 0.5).unwrap().as_deref(), Some("NoIndex"));
    }

    #[test]
    fn test_reopen_keeps_rows_and_index() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = open(&dir);
            store
                .insert(Some(RegionId::from("63000030")), "TaipeiDaan", &square(0.0, 0.0, 1.0))
                .unwrap();
            store.commit().unwrap();
            store.build_index().unwrap();
        }

        let store = open(&dir);
        let region = store.get(&RegionId::from("63000030")).unwrap().unwrap();
        assert_eq!(region.name, "TaipeiDaan");
        assert_eq!(region.srid, SRID_WGS84);
        assert_eq!(region.geometry, square(0.0, 0.0, 1.0));
        assert_eq!(store.region_index().unwrap().len(), 1);
        assert_eq!(
            store.contains_point(0.25, 0.75).unwrap().as_deref(),
            Some("TaipeiDaan")
        );
    }

    #[test]
    fn test_srid_mismatch_rejected() {
        let dir = TempDir::new().unwrap();
        {
            let store = open(&dir);
            store
                .metadata
                .insert(META_SRID, &3826u64.to_be_bytes()[..])
                .unwrap();
            store.db.flush().unwrap();
        }

        let err = DiskStore::open(dir.path().join("regions.db")).err().unwrap();
        assert!(matches!(
            err,
            StoreError::SridMismatch {
                expected: 4326,
                found: 3826
            }
        ));
    }

    #[test]
    fn test_site_effects_declared_but_empty() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        let trees = store.db.tree_names();
        assert!(trees.iter().any(|t| &t[..] == SITE_EFFECTS_TREE.as_bytes()));
        assert!(store.db.open_tree(SITE_EFFECTS_TREE).unwrap().is_empty());
    }

    #[test]
    fn test_bounds_codec() {
        let bounds = [120.1, 22.5, 121.9, 25.3];
        assert_eq!(decode_bounds(b"k", &encode_bounds(bounds)).unwrap(), bounds);
        assert!(decode_bounds(b"k", &[0u8; 7]).is_err());
    }
}
