//! Immutable production lookup table.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::entry::ComputedEntry;
use crate::path::LogicalPath;

/// Immutable mapping from logical path to computed entry.
///
/// Built once at engine construction and read-only afterwards, so lookups
/// need no synchronization and never touch the filesystem.
#[derive(Debug, Default)]
pub struct StaticTable {
    entries: FxHashMap<LogicalPath, Arc<ComputedEntry>>,
}

impl StaticTable {
    pub(crate) fn from_entries(entries: impl IntoIterator<Item = ComputedEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.path().clone(), Arc::new(entry)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, path: &LogicalPath) -> Option<Arc<ComputedEntry>> {
        self.entries.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ComputedEntry>> {
        self.entries.values()
    }
}
