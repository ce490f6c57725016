// SPDX-License-Identifier: MIT
//
// JSON-file likes store — the binary's persistence collaborator.
//
// One file, one JSON object mapping store keys to combination lists.
// Writes replace the whole file; hue-core already serializes mutations,
// so there is never more than one write in flight.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use hue_core::Combination;
use hue_core::likes::{LikesStore, StoreError};

/// A [`LikesStore`] backed by a single JSON file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<BTreeMap<String, Vec<Combination>>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|err| StoreError(format!("read {}: {err}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|err| StoreError(format!("parse {}: {err}", self.path.display())))
    }
}

impl LikesStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<Combination>>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &[Combination]) -> Result<(), StoreError> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value.to_vec());
        let raw = serde_json::to_string_pretty(&all)
            .map_err(|err| StoreError(format!("encode likes: {err}")))?;
        fs::write(&self.path, raw)
            .map_err(|err| StoreError(format!("write {}: {err}", self.path.display())))
    }
}
