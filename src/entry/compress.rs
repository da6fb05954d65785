//! Precomputed gzip bodies for entry content.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::utils::mime;

/// Compress `bytes` with gzip, keeping the result only when it is strictly
/// smaller than the original and the MIME type benefits from compression.
///
/// Compression happens once per entry (build time in production, first
/// request in development), so the best compression level is affordable.
pub(crate) fn maybe_gzip(bytes: &[u8], mime_type: &str) -> io::Result<Option<Vec<u8>>> {
    if bytes.is_empty() || !mime::is_compressible(mime_type) {
        return Ok(None);
    }

    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::best());
    encoder.write_all(bytes)?;
    let compressed = encoder.finish()?;

    Ok((compressed.len() < bytes.len()).then_some(compressed))
}
