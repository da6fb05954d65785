//! Lazily-populated development cache.

use std::sync::Arc;

use dashmap::DashMap;

use crate::entry::ComputedEntry;
use crate::path::LogicalPath;

/// Process-lifetime cache of computed entries, populated on first request.
///
/// Entries are never evicted; restarting the process is how source edits
/// are picked up in development. Shared by all concurrent requests; the
/// insert discipline is insert-if-absent, which is sufficient because
/// racing compilations of the same path produce content-equal entries.
#[derive(Debug, Default)]
pub struct DevCache {
    entries: DashMap<LogicalPath, Arc<ComputedEntry>>,
}

impl DevCache {
    pub(crate) fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, path: &LogicalPath) -> Option<Arc<ComputedEntry>> {
        self.entries.get(path).map(|entry| Arc::clone(entry.value()))
    }

    /// Insert unless another request won the race; returns whichever entry
    /// ended up in the cache.
    pub(crate) fn insert_if_absent(
        &self,
        path: LogicalPath,
        entry: Arc<ComputedEntry>,
    ) -> Arc<ComputedEntry> {
        Arc::clone(self.entries.entry(path).or_insert(entry).value())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
