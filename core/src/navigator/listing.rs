//! Holder of the current remote directory's entries.
//!
//! The store is replaced wholesale after every successful listing
//! response; there is no diffing. Indices into the stored sequence are
//! the display indices the menu and rename flows capture at event time,
//! so a replacement invalidates every previously captured index.

use crate::files::FileEntry;

/// Ordered entries of the current remote directory.
#[derive(Debug, Default)]
pub struct ListingStore {
    entries: Vec<FileEntry>,
}

impl ListingStore {
    /// Create an empty store, as at session start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole listing with a fresh response.
    ///
    /// The backend's self-reference entry (named exactly `"."`) is
    /// dropped here, so stored indices are display indices. `".."` and
    /// every other name are kept as ordinary entries.
    pub fn replace(&mut self, listing: Vec<FileEntry>) {
        self.entries = listing
            .into_iter()
            .filter(|entry| entry.name != ".")
            .collect();
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put exactly the entry at `index` into editing mode, clearing the
    /// flag everywhere else. Returns `false` for a stale index.
    pub fn set_editing(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.editing = i == index;
        }
        true
    }

    /// Clear the editing flag on every entry.
    pub fn clear_editing(&mut self) {
        for entry in &mut self.entries {
            entry.editing = false;
        }
    }

    /// Whether any entry is currently in editing mode.
    pub fn any_editing(&self) -> bool {
        self.entries.iter().any(|entry| entry.editing)
    }
}
