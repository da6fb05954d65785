//! Entry compilation: read, transform, hash, compress.

use super::{ComputedEntry, RawEntry, compress};
use crate::error::{Error, Result};
use crate::hash::ContentHash;

/// Materialize one raw entry.
///
/// The computation is the same in both modes; only *when* it runs differs.
/// Production calls it eagerly while the engine is built, development calls
/// it lazily on the first lookup of each path.
///
/// Unreadable sources and failing transforms surface as errors; an entry is
/// never silently served with empty or untransformed content.
pub(crate) fn compile(raw: &RawEntry) -> Result<ComputedEntry> {
    let bytes = raw.source().read()?;

    let bytes = match raw.transform() {
        Some(transform) => transform(&bytes).map_err(|message| Error::Transform {
            path: raw.path().clone(),
            message,
        })?,
        None => bytes,
    };

    let mime = raw.mime_type();
    let hash = ContentHash::of(&bytes);
    let gzip = compress::maybe_gzip(&bytes, mime).map_err(|source| Error::Compress {
        path: raw.path().clone(),
        source,
    })?;

    Ok(ComputedEntry {
        path: raw.path().clone(),
        binding: raw.binding().map(str::to_owned),
        bytes,
        mime,
        hash,
        gzip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ContentSource, Transform};
    use crate::path::LogicalPath;
    use crate::utils::mime::types;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn logical(path: &str) -> LogicalPath {
        LogicalPath::new(path).unwrap()
    }

    #[test]
    fn test_compile_file_source() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.css");
        std::fs::write(&file, "body{}").unwrap();

        let raw = RawEntry::new(logical("css/app.css"), ContentSource::File(file));
        let entry = compile(&raw).unwrap();

        assert_eq!(entry.bytes(), b"body{}");
        assert_eq!(entry.mime(), types::CSS);
        assert_eq!(entry.hash(), ContentHash::of("body{}"));
        // Too small to benefit from gzip
        assert!(entry.gzip().is_none());
    }

    #[test]
    fn test_compile_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let raw = RawEntry::new(
            logical("app.css"),
            ContentSource::File(dir.path().join("nope.css")),
        );
        assert!(matches!(compile(&raw), Err(Error::Source { .. })));
    }

    #[test]
    fn test_hash_covers_transformed_bytes() {
        let upper: Transform =
            Arc::new(|bytes| Ok(bytes.to_ascii_uppercase()));
        let raw = RawEntry::new(logical("note.txt"), ContentSource::Inline(b"hello".to_vec()))
            .with_transform(upper);

        let entry = compile(&raw).unwrap();
        assert_eq!(entry.bytes(), b"HELLO");
        assert_eq!(entry.hash(), ContentHash::of("HELLO"));
        assert_ne!(entry.hash(), ContentHash::of("hello"));
    }

    #[test]
    fn test_transform_failure_surfaces() {
        let broken: Transform = Arc::new(|_| Err("minifier exploded".to_string()));
        let raw = RawEntry::new(logical("app.js"), ContentSource::Inline(b"x".to_vec()))
            .with_transform(broken);

        match compile(&raw) {
            Err(Error::Transform { path, message }) => {
                assert_eq!(path, "app.js");
                assert!(message.contains("exploded"));
            }
            other => panic!("expected transform error, got {other:?}"),
        }
    }

    #[test]
    fn test_chained_transforms_run_in_order() {
        let first: Transform = Arc::new(|bytes| {
            let mut out = bytes.to_vec();
            out.extend_from_slice(b"-first");
            Ok(out)
        });
        let second: Transform = Arc::new(|bytes| {
            let mut out = bytes.to_vec();
            out.extend_from_slice(b"-second");
            Ok(out)
        });

        let raw = RawEntry::new(logical("a.txt"), ContentSource::Inline(b"x".to_vec()))
            .with_transform(first)
            .map_transform(&second);

        let entry = compile(&raw).unwrap();
        assert_eq!(entry.bytes(), b"x-first-second");
    }

    #[test]
    fn test_compressible_entry_keeps_gzip() {
        let body = "const x = 1; // padding padding padding\n".repeat(40);
        let raw = RawEntry::new(
            logical("js/app.js"),
            ContentSource::Inline(body.clone().into_bytes()),
        );

        let entry = compile(&raw).unwrap();
        let gzip = entry.gzip().expect("repetitive js should compress");
        assert!(gzip.len() < entry.len());
        // Hash still covers the identity body
        assert_eq!(entry.hash(), ContentHash::of(&body));
    }

    #[test]
    fn test_mime_override() {
        let raw = RawEntry::new(logical("data.bin"), ContentSource::Inline(b"{}".to_vec()))
            .with_mime(types::JSON);
        let entry = compile(&raw).unwrap();
        assert_eq!(entry.mime(), types::JSON);
    }
}
