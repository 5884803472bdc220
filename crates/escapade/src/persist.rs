//! The capture/restore contract consumed by a save orchestrator.
//!
//! File I/O stays outside the engine; this module only shapes the data. A
//! [`SaveData`] is a flat string-keyed map of [`PuzzleSnapshot`]s plus a
//! format version, round-trippable through JSON.

use crate::registry::PuzzleRegistry;
use crate::snapshot::PuzzleSnapshot;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Current save format version.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Error from encoding or decoding save data.
#[derive(Debug, Display, Error)]
pub enum PersistError {
    /// Save data failed to serialize.
    #[display("save data encoding failed: {_0}")]
    Encode(serde_json::Error),

    /// Save data failed to deserialize.
    #[display("save data decoding failed: {_0}")]
    Decode(serde_json::Error),

    /// The save was written by an unknown format version.
    #[display("unsupported save format version {found}")]
    UnsupportedVersion {
        /// Version recorded in the save.
        #[error(not(source))]
        found: u32,
    },
}

/// Every puzzle snapshot of one save file, keyed by save key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    version: u32,
    entries: BTreeMap<String, PuzzleSnapshot>,
}

impl SaveData {
    /// Creates empty save data at the current format version.
    pub fn new() -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }

    /// Recorded format version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Stores a snapshot under a key, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, snapshot: PuzzleSnapshot) {
        self.entries.insert(key.into(), snapshot);
    }

    /// Looks up a snapshot by key.
    pub fn get(&self, key: &str) -> Option<&PuzzleSnapshot> {
        self.entries.get(key)
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshots are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes to the JSON wire form.
    pub fn to_json(&self) -> Result<String, PersistError> {
        serde_json::to_string_pretty(self).map_err(PersistError::Encode)
    }

    /// Deserializes from the JSON wire form, rejecting unknown versions.
    pub fn from_json(raw: &str) -> Result<Self, PersistError> {
        let data: Self = serde_json::from_str(raw).map_err(PersistError::Decode)?;
        if data.version != SAVE_FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: data.version,
            });
        }
        Ok(data)
    }
}

impl Default for SaveData {
    fn default() -> Self {
        Self::new()
    }
}

/// Captures a snapshot of every machine in the registry, keyed by each
/// machine's save key. A pure read.
#[instrument(skip(registry))]
pub fn capture_registry(registry: &PuzzleRegistry) -> SaveData {
    let mut data = SaveData::new();
    for id in registry.ids() {
        if let Some(machine) = registry.get(&id) {
            let machine = machine.borrow();
            data.insert(machine.save_key(), machine.capture_state());
        }
    }
    info!(puzzles = data.len(), "captured registry snapshots");
    data
}

/// Restores every machine that has an entry in the save data.
///
/// Machines without an entry are left untouched; entries without a machine
/// are ignored. Each restore emits only `state_changed` on its machine.
#[instrument(skip(registry, data))]
pub fn restore_registry(registry: &PuzzleRegistry, data: &SaveData) {
    let mut restored = 0usize;
    for id in registry.ids() {
        if let Some(machine) = registry.get(&id) {
            let key = machine.borrow().save_key();
            if let Some(snapshot) = data.get(&key) {
                machine.borrow_mut().restore_state(*snapshot);
                restored += 1;
            } else {
                debug!(puzzle_id = %id, save_key = %key, "no save entry, leaving fresh");
            }
        }
    }
    info!(restored, "restored registry snapshots");
}
