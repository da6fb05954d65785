//! Logical path type for embedded entries.
//!
//! - Internal representation: normalized segment sequence, always decoded
//! - Request boundary: decode percent-encoding on input

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Normalized path identifying one entry, e.g. `css/app.css`.
///
/// Independent of any on-disk filename. Invariants:
/// - no leading or trailing `/`
/// - no empty segments
/// - no `.` or `..` segments (which also makes request-side lookups
///   traversal-safe)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalPath(Arc<str>);

impl LogicalPath {
    /// Create from a `/`-separated string. Leading and trailing slashes are
    /// stripped; anything violating the invariants is an error.
    pub fn new(path: impl AsRef<str>) -> Result<Self> {
        let raw = path.as_ref();
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            return Err(invalid(raw, "path is empty"));
        }
        for segment in trimmed.split('/') {
            if segment.is_empty() {
                return Err(invalid(raw, "empty segment"));
            }
            if segment == "." || segment == ".." {
                return Err(invalid(raw, "dot segment"));
            }
        }
        Ok(Self(Arc::from(trimmed)))
    }

    /// Create from individual segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = segments
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("/");
        Self::new(&joined)
    }

    /// Decode a request path remainder: strip the query string, decode
    /// percent-encoding, validate. Returns `None` for anything that cannot
    /// name an entry (traversal attempts included).
    pub fn from_request(raw: &str) -> Option<Self> {
        use percent_encoding::percent_decode_str;
        let path = raw.split('?').next().unwrap_or(raw);
        let decoded = percent_decode_str(path).decode_utf8().ok()?;
        Self::new(decoded.as_ref()).ok()
    }

    /// Get the normalized path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// The final segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Extension of the final segment, if any.
    pub fn extension(&self) -> Option<&str> {
        let (stem, ext) = self.file_name().rsplit_once('.')?;
        (!stem.is_empty()).then_some(ext)
    }
}

impl std::fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LogicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LogicalPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LogicalPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for LogicalPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for LogicalPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LogicalPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

fn invalid(path: &str, reason: &'static str) -> Error {
    Error::InvalidPath {
        path: path.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_slashes() {
        let path = LogicalPath::new("/css/app.css/").unwrap();
        assert_eq!(path.as_str(), "css/app.css");
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(LogicalPath::new("").is_err());
        assert!(LogicalPath::new("/").is_err());
    }

    #[test]
    fn test_new_rejects_empty_segment() {
        assert!(LogicalPath::new("css//app.css").is_err());
    }

    #[test]
    fn test_new_rejects_dot_segments() {
        assert!(LogicalPath::new("../secret").is_err());
        assert!(LogicalPath::new("css/../app.css").is_err());
        assert!(LogicalPath::new("./app.css").is_err());
    }

    #[test]
    fn test_from_segments() {
        let path = LogicalPath::from_segments(["css", "app.css"]).unwrap();
        assert_eq!(path.as_str(), "css/app.css");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["css", "app.css"]);
    }

    #[test]
    fn test_from_request_decodes() {
        let path = LogicalPath::from_request("css/hello%20world.css").unwrap();
        assert_eq!(path.as_str(), "css/hello world.css");
    }

    #[test]
    fn test_from_request_strips_query() {
        let path = LogicalPath::from_request("js/app.js?v=3").unwrap();
        assert_eq!(path.as_str(), "js/app.js");
    }

    #[test]
    fn test_from_request_rejects_traversal() {
        assert!(LogicalPath::from_request("../etc/passwd").is_none());
        // Encoded traversal decodes to dot segments and is rejected too
        assert!(LogicalPath::from_request("%2e%2e/etc/passwd").is_none());
        assert!(LogicalPath::from_request("").is_none());
    }

    #[test]
    fn test_file_name_and_extension() {
        let path = LogicalPath::new("css/app.css").unwrap();
        assert_eq!(path.file_name(), "app.css");
        assert_eq!(path.extension(), Some("css"));

        let bare = LogicalPath::new("LICENSE").unwrap();
        assert_eq!(bare.file_name(), "LICENSE");
        assert_eq!(bare.extension(), None);

        let dotfile = LogicalPath::new("conf/.env").unwrap();
        assert_eq!(dotfile.extension(), None);
    }

    #[test]
    fn test_borrow_lookup() {
        use rustc_hash::FxHashMap;
        let mut map = FxHashMap::default();
        map.insert(LogicalPath::new("css/app.css").unwrap(), 1);
        assert_eq!(map.get("css/app.css"), Some(&1));
    }

    #[test]
    fn test_serialize_deserialize() {
        let path = LogicalPath::new("css/app.css").unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#""css/app.css""#);

        let parsed: LogicalPath = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, path);
    }
}
