//! Snapshot persistence for hemodynamic cases and infusion presets.
//!
//! The calculators never touch storage. Front-ends hand a [`SnapshotStore`] the inputs
//! they want to keep and get them back later; saving overwrites, there is no history
//! and no schema versioning.
//!
//! - file-backed store, one JSON file per key (`json`)
//! - in-memory store (`memory`)

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Drug, HemoInput, InfusionInput};

pub mod json;
pub mod memory;

pub use json::JsonDirStore;
pub use memory::MemoryStore;

/// Maximum length of a case identifier.
const MAX_CASE_ID_LEN: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No saved snapshot for '{0}'.")]
    NotFound(String),
    #[error("Saved snapshot '{key}' is unreadable: {reason}")]
    Corrupt { key: String, reason: String },
    #[error("Invalid case id '{0}' (use 1-64 letters, digits, '-' or '_').")]
    InvalidKey(String),
    #[error("Storage error for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// What a snapshot is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// A hemodynamic case, by bedside case id.
    Case(String),
    /// The saved dilution/dose for a drug.
    Drug(Drug),
}

impl StoreKey {
    /// Build a case key, rejecting ids that are empty, too long, or not `[A-Za-z0-9_-]`.
    pub fn case(id: &str) -> Result<Self, StoreError> {
        let valid = !id.is_empty()
            && id.len() <= MAX_CASE_ID_LEN
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(id.to_string()));
        }
        Ok(StoreKey::Case(id.to_string()))
    }

    /// Flat name usable as a file stem or map key.
    pub fn slug(&self) -> String {
        match self {
            StoreKey::Case(id) => format!("case-{id}"),
            StoreKey::Drug(drug) => format!("preset-{}", drug.id()),
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Stored input fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "fields", rename_all = "snake_case")]
pub enum Snapshot {
    HemoCase(HemoInput),
    DosePreset(InfusionInput),
}

impl Snapshot {
    fn fits(&self, key: &StoreKey) -> bool {
        match (self, key) {
            (Snapshot::HemoCase(_), StoreKey::Case(_)) => true,
            (Snapshot::DosePreset(p), StoreKey::Drug(d)) => p.drug == *d,
            _ => false,
        }
    }
}

/// On-disk envelope around a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub tool: String,
    pub saved_at: DateTime<Utc>,
    pub snapshot: Snapshot,
}

/// Key-value storage for snapshots.
pub trait SnapshotStore {
    /// Store `snapshot` under `key`, replacing anything saved before.
    fn save(&mut self, key: &StoreKey, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Load the snapshot saved under `key`.
    fn load(&self, key: &StoreKey) -> Result<Snapshot, StoreError>;
}

/// Serialize `snapshot` in its envelope.
pub(crate) fn encode(key: &StoreKey, snapshot: &Snapshot) -> Result<String, StoreError> {
    if !snapshot.fits(key) {
        return Err(StoreError::Corrupt {
            key: key.slug(),
            reason: "snapshot kind does not match its key".to_string(),
        });
    }
    let file = SnapshotFile {
        tool: "cicu".to_string(),
        saved_at: Utc::now(),
        snapshot: snapshot.clone(),
    };
    serde_json::to_string_pretty(&file).map_err(|e| StoreError::Corrupt {
        key: key.slug(),
        reason: e.to_string(),
    })
}

/// Parse an envelope and check it belongs to `key`.
pub(crate) fn decode(key: &StoreKey, text: &str) -> Result<Snapshot, StoreError> {
    let file: SnapshotFile = serde_json::from_str(text).map_err(|e| {
        log::warn!("Corrupt snapshot {key}: {e}");
        StoreError::Corrupt {
            key: key.slug(),
            reason: e.to_string(),
        }
    })?;
    if !file.snapshot.fits(key) {
        log::warn!("Snapshot {key} holds data for another key");
        return Err(StoreError::Corrupt {
            key: key.slug(),
            reason: "snapshot kind does not match its key".to_string(),
        });
    }
    Ok(file.snapshot)
}
