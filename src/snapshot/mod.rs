//! Versioned snapshots of the cycle store.
//!
//! This module provides serialization and rehydration for the store,
//! so a tracker survives process restarts: a snapshot wraps the store
//! with a format version and save timestamp, and rehydration falls
//! back to an empty store whenever the persisted blob is absent,
//! malformed, from an unsupported version, or fails validation.

use crate::core::CyclesState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub mod error;
mod storage;
mod validate;

pub use error::SnapshotError;
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage};
pub use validate::{check_state, StateViolation};

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Default storage key; the schema version rides in the key so a
/// format bump never reads an incompatible slot.
pub const DEFAULT_STORAGE_KEY: &str = "cycles-state-1.0.0";

/// Serializable snapshot of the cycle store.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,

    /// The persisted store
    pub state: CyclesState,
}

impl Snapshot {
    /// Wrap a store in the current snapshot format.
    pub fn new(state: CyclesState, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at,
            state,
        }
    }

    /// Serialize to JSON. Dates become ISO-8601 strings.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Deserialize from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::Deserialization(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Serialize to the compact binary format.
    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Deserialize from the binary format, rejecting unsupported
    /// versions.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::Deserialization(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }

    /// Load the store persisted under `key`, failing soft.
    ///
    /// An absent key yields an empty store. A blob that cannot be
    /// parsed, carries an unsupported version, or fails
    /// [`check_state`] is discarded with a warning and also yields an
    /// empty store; rehydration never errors.
    pub fn rehydrate(storage: &impl SnapshotStorage, key: &str) -> CyclesState {
        let blob = match storage.load(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return CyclesState::new(),
            Err(err) => {
                warn!(key, error = %err, "failed to read persisted snapshot, starting empty");
                return CyclesState::new();
            }
        };

        let snapshot = match Self::from_json(&blob) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(key, error = %err, "discarding malformed snapshot");
                return CyclesState::new();
            }
        };

        let violations = check_state(&snapshot.state);
        if !violations.is_empty() {
            warn!(
                key,
                violations = violations.len(),
                first = %violations[0],
                "discarding snapshot that fails validation"
            );
            return CyclesState::new();
        }

        snapshot.state
    }
}
