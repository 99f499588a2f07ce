//! Storage layer: the read-only reference store of Nice class texts.
//!
//! The store is built once from the exported JSON dataset and never mutated
//! afterwards, so it can be shared behind an `Arc` without locking.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub mod models;

pub use models::{ClassId, ReferenceRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read reference dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed reference dataset {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate class {0} in reference dataset")]
    DuplicateClass(ClassId),
    #[error("class {0} not found in reference store")]
    NotFound(ClassId),
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    records: BTreeMap<ClassId, ReferenceRecord>,
}

impl ReferenceStore {
    /// Loads a JSON array of class records from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(std::io::BufReader::new(file), &path.display().to_string())?;
        info!(path = %path.display(), classes = store.len(), "reference store loaded");
        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R, origin: &str) -> Result<Self, StoreError> {
        let records: Vec<ReferenceRecord> =
            serde_json::from_reader(reader).map_err(|source| StoreError::Malformed {
                origin: origin.to_string(),
                source,
            })?;
        Self::from_records(records)
    }

    /// Rejects the whole dataset if any class number appears twice.
    pub fn from_records(records: Vec<ReferenceRecord>) -> Result<Self, StoreError> {
        let mut map = BTreeMap::new();
        for record in records {
            let id = record.class_id;
            if map.insert(id, record).is_some() {
                return Err(StoreError::DuplicateClass(id));
            }
        }
        Ok(Self { records: map })
    }

    pub fn get(&self, class_id: ClassId) -> Result<&ReferenceRecord, StoreError> {
        self.records
            .get(&class_id)
            .ok_or(StoreError::NotFound(class_id))
    }

    pub fn contains(&self, class_id: ClassId) -> bool {
        self.records.contains_key(&class_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Class numbers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.records.keys().copied()
    }
}
