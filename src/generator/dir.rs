//! Directory tree generator.

use std::io;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::{BuildEnv, Generator};
use crate::entry::{ContentSource, RawEntry};
use crate::error::{Error, Result};
use crate::path::LogicalPath;

/// Embeds every file under a directory, preserving the tree structure as
/// logical paths.
///
/// Traversal results are sorted so the entry set is deterministic for a
/// given tree. Hidden files (dot-prefixed names) are skipped.
pub struct DirGenerator {
    dir: PathBuf,
    prefix: Option<LogicalPath>,
}

impl DirGenerator {
    /// `dir` is resolved against the build base directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: None,
        }
    }

    /// Mount the tree under a logical prefix instead of at the root.
    pub fn with_prefix(mut self, prefix: LogicalPath) -> Self {
        self.prefix = Some(prefix);
        self
    }
}

impl Generator for DirGenerator {
    fn generate(&self, env: &BuildEnv) -> Result<Vec<RawEntry>> {
        let root = env.resolve(&self.dir);
        if !root.is_dir() {
            return Err(Error::Source {
                path: root,
                source: io::Error::new(io::ErrorKind::NotFound, "directory not found"),
            });
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path())
            .collect();
        files.sort();

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let Some(rel) = relative_segments(&file, &root)? else {
                continue; // hidden file
            };
            let path = match &self.prefix {
                Some(prefix) => LogicalPath::new(format!("{prefix}/{rel}"))?,
                None => LogicalPath::new(&rel)?,
            };
            entries.push(RawEntry::new(path, ContentSource::File(file)));
        }
        Ok(entries)
    }
}

/// Relative path below `root` as `/`-joined segments; `None` for hidden
/// files, an error for non-UTF-8 names (those cannot become logical paths).
fn relative_segments(file: &Path, root: &Path) -> Result<Option<String>> {
    let rel = file.strip_prefix(root).unwrap_or(file);
    let mut segments = Vec::new();
    for component in rel.components() {
        let segment = component
            .as_os_str()
            .to_str()
            .ok_or(Error::InvalidPath {
                path: file.display().to_string(),
                reason: "file name is not valid utf-8",
            })?;
        if segment.starts_with('.') {
            return Ok(None);
        }
        segments.push(segment);
    }
    Ok(Some(segments.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_tree_becomes_logical_paths() {
        let dir = TempDir::new().unwrap();
        write(&dir, "assets/css/app.css", "body{}");
        write(&dir, "assets/js/app.js", "let x");
        write(&dir, "assets/logo.png", "png");

        let entries = DirGenerator::new("assets")
            .generate(&BuildEnv::new(dir.path()))
            .unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path().as_str()).collect();
        assert_eq!(paths, vec!["css/app.css", "js/app.js", "logo.png"]);
    }

    #[test]
    fn test_prefix_is_prepended() {
        let dir = TempDir::new().unwrap();
        write(&dir, "assets/app.css", "body{}");

        let entries = DirGenerator::new("assets")
            .with_prefix(LogicalPath::new("static").unwrap())
            .generate(&BuildEnv::new(dir.path()))
            .unwrap();
        assert_eq!(entries[0].path(), &"static/app.css");
    }

    #[test]
    fn test_output_is_sorted() {
        let dir = TempDir::new().unwrap();
        write(&dir, "assets/z.txt", "z");
        write(&dir, "assets/a.txt", "a");
        write(&dir, "assets/m/b.txt", "b");

        let entries = DirGenerator::new("assets")
            .generate(&BuildEnv::new(dir.path()))
            .unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path().as_str()).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn test_hidden_files_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "assets/.hidden", "secret");
        write(&dir, "assets/.git/config", "secret");
        write(&dir, "assets/visible.txt", "ok");

        let entries = DirGenerator::new("assets")
            .generate(&BuildEnv::new(dir.path()))
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path(), &"visible.txt");
    }

    #[test]
    fn test_missing_directory_fails_build() {
        let dir = TempDir::new().unwrap();
        let result = DirGenerator::new("nope").generate(&BuildEnv::new(dir.path()));
        assert!(matches!(result, Err(Error::Source { .. })));
    }
}
