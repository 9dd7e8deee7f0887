//! Key-value storage port for persisted snapshots.
//!
//! The tracker writes one serialized snapshot per key, mirroring a
//! browser-local storage slot. Implementations are synchronous and
//! best-effort; callers decide what a failed save means (the tracker
//! logs and moves on).

use super::error::SnapshotError;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// A single-slot-per-key persistent store.
pub trait SnapshotStorage {
    /// Read the value stored under `key`, `None` if the key is absent.
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError>;

    /// Write `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), SnapshotError>;
}

impl<T: SnapshotStorage + ?Sized> SnapshotStorage for &T {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SnapshotError> {
        (**self).save(key, value)
    }
}

/// File-backed storage: one file per key inside a directory.
///
/// # Example
///
/// ```rust,no_run
/// use focal::snapshot::{FileStorage, SnapshotStorage};
///
/// let storage = FileStorage::new("/var/lib/focal");
/// storage.save("cycles-state-1.0.0", "{}")?;
/// assert!(storage.load("cycles-state-1.0.0")?.is_some());
/// # Ok::<(), focal::snapshot::SnapshotError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`. The directory is created on the
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SnapshotStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SnapshotError::Storage(err)),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SnapshotError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory storage for tests and doc examples.
#[derive(Default, Debug)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        // A poisoned lock only means another writer panicked mid-save;
        // the map itself is still usable.
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SnapshotError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
