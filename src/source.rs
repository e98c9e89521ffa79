//! Raw feature suppliers.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use crate::error::SourceError;
use crate::models::{FeatureCollection, RawFeature};

/// Supplies raw input records one at a time
pub trait FeatureSource {
    fn next_feature(&mut self) -> Option<Result<RawFeature, SourceError>>;

    /// Number of remaining records, if known up front
    fn len_hint(&self) -> Option<usize> {
        None
    }
}

/// Features of a GeoJSON `FeatureCollection`, in file order
#[derive(Debug)]
pub struct GeoJsonSource {
    features: std::vec::IntoIter<RawFeature>,
}

impl GeoJsonSource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Reading features from {}", path.display());
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        let collection: FeatureCollection = serde_json::from_reader(reader)?;
        info!("Loaded {} features", collection.features.len());
        Ok(Self::from_features(collection.features))
    }

    pub fn from_features(features: Vec<RawFeature>) -> Self {
        Self {
            features: features.into_iter(),
        }
    }
}

impl FeatureSource for GeoJsonSource {
    fn next_feature(&mut self) -> Option<Result<RawFeature, SourceError>> {
        self.features.next().map(Ok)
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.features.len())
    }
}
