//! Build-time entry generators.
//!
//! A generator runs once, against the build environment, and yields the raw
//! entries to embed. Generators must be deterministic for a given build
//! environment: the same inputs must produce the same set of logical paths,
//! because generated route bindings refer to those paths by name.

mod dir;
mod file;
mod inline;
mod wrap;

pub use dir::DirGenerator;
pub use file::FileGenerator;
pub use inline::InlineGenerator;
pub use wrap::Transformed;

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::entry::RawEntry;
use crate::error::{Error, Result};
use crate::path::LogicalPath;

/// Build environment handed to every generator.
#[derive(Debug, Clone)]
pub struct BuildEnv {
    base_dir: PathBuf,
}

impl BuildEnv {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a path relative to the build base directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Build-time producer of raw entries.
pub trait Generator {
    fn generate(&self, env: &BuildEnv) -> Result<Vec<RawEntry>>;
}

/// Run all generators and enforce path and binding uniqueness.
///
/// Entry order follows generator registration order, so route lists and the
/// emitted bindings are stable across builds.
pub(crate) fn collect_entries(
    generators: &[Box<dyn Generator>],
    env: &BuildEnv,
) -> Result<Vec<RawEntry>> {
    let mut entries = Vec::new();
    for generator in generators {
        entries.extend(generator.generate(env)?);
    }
    check_unique_paths(&entries)?;
    check_unique_bindings(&entries)?;
    Ok(entries)
}

/// Duplicate logical paths are a configuration error, never a silent
/// overwrite: the report names every claiming source.
fn check_unique_paths(entries: &[RawEntry]) -> Result<()> {
    let mut sources: FxHashMap<&LogicalPath, Vec<String>> = FxHashMap::default();
    for entry in entries {
        sources
            .entry(entry.path())
            .or_default()
            .push(entry.source().describe());
    }
    for entry in entries {
        if let Some(claims) = sources.get(entry.path())
            && claims.len() > 1
        {
            return Err(Error::DuplicatePath {
                path: entry.path().clone(),
                sources: claims.clone(),
            });
        }
    }
    Ok(())
}

/// Binding names become generated constants; collisions are build errors.
fn check_unique_bindings(entries: &[RawEntry]) -> Result<()> {
    let mut seen: FxHashMap<&str, &LogicalPath> = FxHashMap::default();
    for entry in entries {
        if let Some(name) = entry.binding()
            && let Some(first) = seen.insert(name, entry.path())
        {
            return Err(Error::DuplicateBinding {
                name: name.to_string(),
                first: first.clone(),
                second: entry.path().clone(),
            });
        }
    }
    Ok(())
}
