//! File-backed snapshot store.
//!
//! Each key maps to `<dir>/<slug>.json`, e.g. `case-bed4.json` or
//! `preset-norepinephrine.json`. The directory is created on first save.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::store::{Snapshot, SnapshotStore, StoreError, StoreKey, decode, encode};

#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &StoreKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.slug()))
    }
}

impl SnapshotStore for JsonDirStore {
    fn save(&mut self, key: &StoreKey, snapshot: &Snapshot) -> Result<(), StoreError> {
        let text = encode(key, snapshot)?;
        let io_err = |source: std::io::Error| StoreError::Io {
            key: key.slug(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let path = self.path_for(key);
        fs::write(&path, text).map_err(io_err)?;

        log::info!("Saved {key} to {}", path.display());
        Ok(())
    }

    fn load(&self, key: &StoreKey) -> Result<Snapshot, StoreError> {
        let path = self.path_for(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound(key.slug())),
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.slug(),
                    source,
                });
            }
        };

        let snapshot = decode(key, &text)?;
        log::info!("Loaded {key} from {}", path.display());
        Ok(snapshot)
    }
}
