//! Disk-backed store for widget files.
//!
//! Widget entries exist for content produced by add-on tooling (e.g. a
//! minifier writing combined page assets to disk) that must be served by
//! name rather than through the embedded table. Content is read per
//! request, so on-disk edits show up immediately.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::path::LogicalPath;

/// Files served by name from disk under the widget mount.
#[derive(Debug, Default)]
pub struct WidgetStore {
    files: FxHashMap<LogicalPath, PathBuf>,
}

impl WidgetStore {
    pub(crate) fn register(&mut self, path: LogicalPath, file: PathBuf) {
        self.files.insert(path, file);
    }

    /// Resolve a registered widget file. Unregistered names miss; the path
    /// validation done by [`LogicalPath`] keeps lookups traversal-safe.
    pub fn resolve(&self, path: &LogicalPath) -> Option<&Path> {
        self.files.get(path).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
