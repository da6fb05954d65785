//! Synthesized-content generator.

use super::{BuildEnv, Generator};
use crate::entry::{ContentSource, RawEntry};
use crate::error::Result;
use crate::path::LogicalPath;

/// Embeds procedurally generated bytes under a fixed logical path.
pub struct InlineGenerator {
    path: LogicalPath,
    bytes: Vec<u8>,
    binding: Option<String>,
    mime: Option<&'static str>,
}

impl InlineGenerator {
    pub fn new(path: LogicalPath, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path,
            bytes: bytes.into(),
            binding: None,
            mime: None,
        }
    }

    /// Expose a route for this entry under `name`.
    pub fn with_binding(mut self, name: impl Into<String>) -> Self {
        self.binding = Some(name.into());
        self
    }

    /// Override the MIME type derived from the logical path.
    pub fn with_mime(mut self, mime: &'static str) -> Self {
        self.mime = Some(mime);
        self
    }
}

impl Generator for InlineGenerator {
    fn generate(&self, _env: &BuildEnv) -> Result<Vec<RawEntry>> {
        let mut entry = RawEntry::new(
            self.path.clone(),
            ContentSource::Inline(self.bytes.clone()),
        );
        if let Some(name) = &self.binding {
            entry = entry.with_binding(name.clone());
        }
        if let Some(mime) = self.mime {
            entry = entry.with_mime(mime);
        }
        Ok(vec![entry])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::mime::types;

    #[test]
    fn test_inline_entry() {
        let entries = InlineGenerator::new(
            LogicalPath::new("version.json").unwrap(),
            br#"{"version":"0.3.1"}"#.to_vec(),
        )
        .with_binding("version")
        .generate(&BuildEnv::new("."))
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path(), &"version.json");
        assert_eq!(entries[0].binding(), Some("version"));
    }

    #[test]
    fn test_mime_override() {
        let entries = InlineGenerator::new(LogicalPath::new("health").unwrap(), b"ok".to_vec())
            .with_mime(types::PLAIN)
            .generate(&BuildEnv::new("."))
            .unwrap();
        assert_eq!(entries[0].path(), &"health");
    }
}
