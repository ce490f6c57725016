//! Liked combinations — an in-memory list with a pluggable persistence
//! seam.
//!
//! Persistence is an external collaborator behind [`LikesStore`]; this
//! module only guarantees two things about how it's used:
//!
//! 1. **Writes are serialized.** Every mutation flushes the full list to
//!    the store before the call returns, in mutation order. Like/unlike
//!    bursts can never interleave a read-modify-write that drops an entry.
//! 2. **Store failures are non-fatal.** The in-memory list always updates;
//!    a failed flush is logged and surfaced to the caller, who may warn
//!    the user but keeps a working session.

use thiserror::Error;

use crate::combination::Combination;

/// The storage key every flush writes to.
pub const LIKES_KEY: &str = "likes";

// ---------------------------------------------------------------------------
// LikesStore
// ---------------------------------------------------------------------------

/// A store write or read failed. The message comes from the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("likes store failure: {0}")]
pub struct StoreError(pub String);

/// External key-value collaborator for persisting liked combinations.
pub trait LikesStore {
    /// Fetch the combinations stored under `key`, or `None` if the key has
    /// never been written.
    ///
    /// # Errors
    ///
    /// [`StoreError`] when the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<Combination>>, StoreError>;

    /// Replace the combinations stored under `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError`] when the underlying storage cannot be written.
    fn set(&mut self, key: &str, value: &[Combination]) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

/// The user's saved combinations.
#[derive(Debug, Clone, Default)]
pub struct Likes {
    entries: Vec<Combination>,
}

impl Likes {
    /// An empty likes list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Load the list from the store, replacing current contents.
    ///
    /// A key that has never been written leaves the list empty.
    ///
    /// # Errors
    ///
    /// [`StoreError`] from the collaborator; the in-memory list is left
    /// unchanged in that case.
    pub fn load(&mut self, store: &dyn LikesStore) -> Result<(), StoreError> {
        self.entries = store.get(LIKES_KEY)?.unwrap_or_default();
        Ok(())
    }

    /// Add a combination and flush.
    ///
    /// Exact duplicates of an existing entry are skipped (the list stays
    /// deduplicated) but the flush still runs, so a previously failed
    /// write gets retried.
    ///
    /// # Errors
    ///
    /// [`StoreError`] when the flush fails. The in-memory list has already
    /// been updated — the error is information, not a rollback.
    pub fn like(
        &mut self,
        combination: Combination,
        store: &mut dyn LikesStore,
    ) -> Result<(), StoreError> {
        if !self.entries.contains(&combination) {
            self.entries.push(combination);
        }
        self.flush(store)
    }

    /// Remove the entry at `index` and flush. Out-of-bounds is a no-op
    /// (no flush).
    ///
    /// # Errors
    ///
    /// [`StoreError`] when the flush fails; in-memory removal stands.
    pub fn remove_at(
        &mut self,
        index: usize,
        store: &mut dyn LikesStore,
    ) -> Result<(), StoreError> {
        if index >= self.entries.len() {
            return Ok(());
        }
        self.entries.remove(index);
        self.flush(store)
    }

    /// The entry at `index`, if in bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Combination> {
        self.entries.get(index)
    }

    /// All saved combinations, in save order.
    #[must_use]
    pub fn entries(&self) -> &[Combination] {
        &self.entries
    }

    /// Number of saved combinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&self, store: &mut dyn LikesStore) -> Result<(), StoreError> {
        store.set(LIKES_KEY, &self.entries).inspect_err(|err| {
            log::warn!("failed to persist likes: {err}");
        })
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory [`LikesStore`] for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<Vec<Combination>>,
    /// When set, every write fails with this message.
    pub fail_writes: Option<String>,
    writes: usize,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: None,
            fail_writes: None,
            writes: 0,
        }
    }

    /// How many writes have been attempted.
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.writes
    }
}

impl LikesStore for MemoryStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<Combination>>, StoreError> {
        Ok(self.value.clone())
    }

    fn set(&mut self, _key: &str, value: &[Combination]) -> Result<(), StoreError> {
        self.writes += 1;
        if let Some(msg) = &self.fail_writes {
            return Err(StoreError(msg.clone()));
        }
        self.value = Some(value.to_vec());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
