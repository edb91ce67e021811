//! In-memory snapshot store.
//!
//! Holds the same serialized envelopes as the file store, so corruption and kind
//! checks behave identically.

use std::collections::HashMap;

use crate::store::{Snapshot, SnapshotStore, StoreError, StoreKey, decode, encode};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put raw text under a key, bypassing encoding.
    pub fn insert_raw(&mut self, key: &StoreKey, text: impl Into<String>) {
        self.entries.insert(key.slug(), text.into());
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, key: &StoreKey, snapshot: &Snapshot) -> Result<(), StoreError> {
        let text = encode(key, snapshot)?;
        self.entries.insert(key.slug(), text);
        log::info!("Saved {key} in memory");
        Ok(())
    }

    fn load(&self, key: &StoreKey) -> Result<Snapshot, StoreError> {
        let text = self
            .entries
            .get(&key.slug())
            .ok_or_else(|| StoreError::NotFound(key.slug()))?;
        decode(key, text)
    }
}
