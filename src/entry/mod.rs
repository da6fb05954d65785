//! Raw and computed entry types.
//!
//! A [`RawEntry`] is the pre-compilation description of one servable item,
//! produced by a generator. Compiling it (reading the source, applying the
//! transform, hashing, compressing) yields a [`ComputedEntry`] ready to
//! serve. Production mode compiles eagerly at engine build; development mode
//! compiles lazily on first request.

mod compile;
mod compress;

pub(crate) use compile::compile;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::hash::ContentHash;
use crate::path::LogicalPath;
use crate::utils::mime;

/// Where an entry's bytes come from.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Read from a file resolved at build time.
    File(PathBuf),
    /// Bytes synthesized by the generator itself.
    Inline(Vec<u8>),
}

impl ContentSource {
    pub(crate) fn read(&self) -> Result<Vec<u8>> {
        match self {
            Self::File(path) => std::fs::read(path).map_err(|source| Error::Source {
                path: path.clone(),
                source,
            }),
            Self::Inline(bytes) => Ok(bytes.clone()),
        }
    }

    /// Human-readable origin for conflict reports.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline(bytes) => format!("<inline, {} bytes>", bytes.len()),
        }
    }
}

/// Byte transform applied before hashing (e.g. minification).
///
/// Must be pure and deterministic: the same input bytes always produce the
/// same output bytes, because the content hash (and therefore the ETag) is
/// computed over the transform's output.
pub type Transform = Arc<dyn Fn(&[u8]) -> std::result::Result<Vec<u8>, String> + Send + Sync>;

/// Pre-compilation description of one servable item.
///
/// Immutable once produced by a generator; consumed by entry compilation.
#[derive(Clone)]
pub struct RawEntry {
    path: LogicalPath,
    source: ContentSource,
    binding: Option<String>,
    transform: Option<Transform>,
    mime: Option<&'static str>,
    widget: bool,
}

impl RawEntry {
    pub fn new(path: LogicalPath, source: ContentSource) -> Self {
        Self {
            path,
            source,
            binding: None,
            transform: None,
            mime: None,
            widget: false,
        }
    }

    /// Name under which a route for this entry is exposed to the host.
    pub fn with_binding(mut self, name: impl Into<String>) -> Self {
        self.binding = Some(name.into());
        self
    }

    /// Post-process hook run on the bytes before hashing.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Override the MIME type derived from the path extension.
    pub fn with_mime(mut self, mime: &'static str) -> Self {
        self.mime = Some(mime);
        self
    }

    /// Mark as a widget file: in development it is served live from disk
    /// under the widget mount instead of through the entry table.
    pub fn widget(mut self) -> Self {
        self.widget = true;
        self
    }

    /// Chain `next` after any transform already present.
    pub fn map_transform(mut self, next: &Transform) -> Self {
        self.transform = Some(match self.transform.take() {
            Some(first) => {
                let next = Arc::clone(next);
                Arc::new(move |bytes: &[u8]| first(bytes).and_then(|out| next(&out)))
            }
            None => Arc::clone(next),
        });
        self
    }

    pub fn path(&self) -> &LogicalPath {
        &self.path
    }

    pub fn source(&self) -> &ContentSource {
        &self.source
    }

    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    pub fn is_widget(&self) -> bool {
        self.widget
    }

    pub(crate) fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub(crate) fn mime_type(&self) -> &'static str {
        self.mime
            .unwrap_or_else(|| mime::from_extension(self.path.extension()))
    }
}

impl fmt::Debug for RawEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawEntry")
            .field("path", &self.path)
            .field("source", &self.source)
            .field("binding", &self.binding)
            .field("has_transform", &self.transform.is_some())
            .field("widget", &self.widget)
            .finish()
    }
}

/// Fully materialized, hashed, optionally compressed item ready to serve.
///
/// Invariants: `hash` is the blake3 digest of `bytes` exactly as served
/// (post-transform, pre-compression); `gzip` is present only if strictly
/// smaller than `bytes` and the MIME type benefits from compression.
#[derive(Debug, Clone)]
pub struct ComputedEntry {
    path: LogicalPath,
    binding: Option<String>,
    bytes: Vec<u8>,
    mime: &'static str,
    hash: ContentHash,
    gzip: Option<Vec<u8>>,
}

impl ComputedEntry {
    pub fn path(&self) -> &LogicalPath {
        &self.path
    }

    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    /// The body exactly as hashed.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn hash(&self) -> ContentHash {
        self.hash
    }

    /// Precomputed gzip body, when it pays off.
    pub fn gzip(&self) -> Option<&[u8]> {
        self.gzip.as_deref()
    }

    /// HTTP validator: the quoted content hash.
    pub fn etag(&self) -> String {
        self.hash.etag()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
