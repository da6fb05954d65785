//! Engine error types.
//!
//! Build-time configuration errors (missing sources, failed transforms,
//! duplicate paths or bindings) are fatal: they block engine construction.
//! The only runtime variants are development-mode source/transform failures,
//! which are scoped to a single request and never cached.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::path::LogicalPath;

/// Errors raised while building or querying the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A logical path failed validation.
    #[error("invalid logical path `{path}`: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// A declared source is missing or unreadable.
    #[error("cannot read source `{path}`")]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A post-process transform rejected the content.
    #[error("transform failed for `{path}`: {message}")]
    Transform { path: LogicalPath, message: String },

    /// Two or more raw entries claim the same logical path.
    #[error("duplicate logical path `{path}`: claimed by {}", .sources.join(", "))]
    DuplicatePath {
        path: LogicalPath,
        sources: Vec<String>,
    },

    /// Two or more raw entries claim the same binding name.
    #[error("duplicate binding `{name}`: claimed by `{first}` and `{second}`")]
    DuplicateBinding {
        name: String,
        first: LogicalPath,
        second: LogicalPath,
    },

    /// A widget entry was declared with a non-file source.
    #[error("widget entry `{0}` must use a file source")]
    WidgetSource(LogicalPath),

    /// Compressing an entry body failed.
    #[error("compression failed for `{path}`")]
    Compress {
        path: LogicalPath,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
