//! Undo/redo history over combinations — linear and branch-discarding.
//!
//! Maintains two stacks around a `present` value: combinations that can be
//! returned to (`past`) and combinations undone but not yet overwritten
//! (`future`). Setting a new combination always clears `future` — once the
//! user moves away from an undone branch, its redo entries are discarded,
//! never merged.

use crate::combination::Combination;

/// Linear undo/redo store for combinations.
///
/// Starts empty: the first [`set`](Self::set) establishes `present`
/// without pushing anything undoable. Underflowing `undo`/`redo` is a
/// reported no-op, never an error.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<Combination>,
    present: Option<Combination>,
    future: Vec<Combination>,
}

impl History {
    /// An empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            past: Vec::new(),
            present: None,
            future: Vec::new(),
        }
    }

    /// The current combination, if one has been set.
    #[must_use]
    pub const fn present(&self) -> Option<&Combination> {
        self.present.as_ref()
    }

    /// Make `next` the present combination.
    ///
    /// The old present (if any) becomes undoable; any redoable future is
    /// discarded unconditionally.
    pub fn set(&mut self, next: Combination) {
        if let Some(current) = self.present.replace(next) {
            self.past.push(current);
        }
        self.future.clear();
    }

    /// Step back to the most recent past combination.
    ///
    /// Returns `false` (state untouched) when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        if let Some(current) = self.present.replace(previous) {
            self.future.insert(0, current);
        }
        true
    }

    /// Step forward to the most recently undone combination.
    ///
    /// Returns `false` (state untouched) when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if self.future.is_empty() {
            return false;
        }
        let next = self.future.remove(0);
        if let Some(current) = self.present.replace(next) {
            self.past.push(current);
        }
        true
    }

    /// Whether [`undo`](Self::undo) would change state.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether [`redo`](Self::redo) would change state.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undoable combinations.
    #[must_use]
    pub fn past_len(&self) -> usize {
        self.past.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
