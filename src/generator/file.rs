//! Single-file generator.

use std::io;
use std::path::{Path, PathBuf};

use super::{BuildEnv, Generator};
use crate::entry::{ContentSource, RawEntry, Transform};
use crate::error::{Error, Result};
use crate::path::LogicalPath;

/// Embeds one file from the build tree.
///
/// A missing or unreadable source fails the build; a generator never
/// silently produces fewer entries than declared.
pub struct FileGenerator {
    file: PathBuf,
    path: Option<LogicalPath>,
    binding: Option<String>,
    transform: Option<Transform>,
    mime: Option<&'static str>,
    widget: bool,
}

impl FileGenerator {
    /// `file` is resolved against the build base directory.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            path: None,
            binding: None,
            transform: None,
            mime: None,
            widget: false,
        }
    }

    /// Override the logical path (defaults to the file name).
    pub fn at(mut self, path: LogicalPath) -> Self {
        self.path = Some(path);
        self
    }

    /// Expose a route for this entry under `name`.
    pub fn with_binding(mut self, name: impl Into<String>) -> Self {
        self.binding = Some(name.into());
        self
    }

    /// Post-process the content before hashing.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Override the MIME type derived from the logical path.
    pub fn with_mime(mut self, mime: &'static str) -> Self {
        self.mime = Some(mime);
        self
    }

    /// Serve this file live from disk under the widget mount in development.
    pub fn widget(mut self) -> Self {
        self.widget = true;
        self
    }
}

impl Generator for FileGenerator {
    fn generate(&self, env: &BuildEnv) -> Result<Vec<RawEntry>> {
        let file = env.resolve(&self.file);

        let metadata = std::fs::metadata(&file).map_err(|source| Error::Source {
            path: file.clone(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(Error::Source {
                path: file,
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        let path = match &self.path {
            Some(path) => path.clone(),
            None => logical_from_file_name(&file)?,
        };

        let mut entry = RawEntry::new(path, ContentSource::File(file));
        if let Some(name) = &self.binding {
            entry = entry.with_binding(name.clone());
        }
        if let Some(transform) = &self.transform {
            entry = entry.with_transform(Transform::clone(transform));
        }
        if let Some(mime) = self.mime {
            entry = entry.with_mime(mime);
        }
        if self.widget {
            entry = entry.widget();
        }
        Ok(vec![entry])
    }
}

fn logical_from_file_name(file: &Path) -> Result<LogicalPath> {
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or(Error::InvalidPath {
            path: file.display().to_string(),
            reason: "file name is not valid utf-8",
        })?;
    LogicalPath::new(name)
}
