//! Part storage: where extracted file parts are materialized, exactly once
//! per derived name.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CarveError, Result};

/// Destination for extracted part bytes.
///
/// `exists` + `save` is the dedup seam: the walk checks `exists` before
/// writing and skips the write when the name was already materialized,
/// while still reporting the part in the decomposed record. The two calls
/// are not atomic across processes; names embed the message key, which
/// keeps true cross-message collisions rare.
pub trait PartStore {
    /// Whether `storage_name` was already materialized at the destination.
    fn exists(&self, storage_name: &str) -> bool;

    /// Persist part bytes in binary mode under `storage_name`.
    fn save(&mut self, storage_name: &str, bytes: &[u8]) -> Result<()>;

    /// The storage path reported for a materialized name.
    fn path_of(&self, storage_name: &str) -> PathBuf;
}

/// A [`PartStore`] writing into an injected destination directory.
///
/// Keeps an in-process set of names already seen, so repeated extractions
/// within one process never race their own `exists` check against the
/// filesystem.
#[derive(Debug)]
pub struct DirectoryStore {
    dir: PathBuf,
    seen: HashSet<String>,
}

impl DirectoryStore {
    /// Open a store over an existing directory.
    ///
    /// Directory lifecycle (creation, cleanup) is the caller's concern; a
    /// missing or non-directory path is rejected here, before any walk.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(CarveError::Destination(dir));
        }
        Ok(Self {
            dir,
            seen: HashSet::new(),
        })
    }

    /// The destination directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PartStore for DirectoryStore {
    fn exists(&self, storage_name: &str) -> bool {
        self.seen.contains(storage_name) || self.dir.join(storage_name).exists()
    }

    fn save(&mut self, storage_name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.dir.join(storage_name);
        std::fs::write(&path, bytes).map_err(|source| CarveError::StorageWrite {
            name: storage_name.to_string(),
            source,
        })?;
        debug!(name = storage_name, bytes = bytes.len(), "part written");
        self.seen.insert(storage_name.to_string());
        Ok(())
    }

    fn path_of(&self, storage_name: &str) -> PathBuf {
        self.dir.join(storage_name)
    }
}

/// An in-memory [`PartStore`].
///
/// Useful for dry-run decomposition (inspect what would be extracted
/// without touching the filesystem) and as a write-counting double in
/// tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, Vec<u8>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored under `storage_name`, if any.
    pub fn get(&self, storage_name: &str) -> Option<&[u8]> {
        self.files.get(storage_name).map(Vec::as_slice)
    }

    /// Number of `save` calls that actually stored bytes.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl PartStore for MemoryStore {
    fn exists(&self, storage_name: &str) -> bool {
        self.files.contains_key(storage_name)
    }

    fn save(&mut self, storage_name: &str, bytes: &[u8]) -> Result<()> {
        self.files.insert(storage_name.to_string(), bytes.to_vec());
        self.writes += 1;
        Ok(())
    }

    fn path_of(&self, storage_name: &str) -> PathBuf {
        PathBuf::from(storage_name)
    }
}
