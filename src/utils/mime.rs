//! MIME type detection.
//!
//! Entry MIME types come from the logical path extension; widget files are
//! detected from their on-disk name. `is_compressible` gates which types get
//! a precomputed gzip body.

use std::path::Path;

/// Common MIME type constants.
pub mod types {
    // Text
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
    pub const MARKDOWN: &str = "text/markdown; charset=utf-8";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml";

    // Binary
    pub const OCTET_STREAM: &str = "application/octet-stream";
    pub const WASM: &str = "application/wasm";
    pub const PDF: &str = "application/pdf";
    pub const ZIP: &str = "application/zip";
    pub const GZIP: &str = "application/gzip";

    // Images
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";

    // Media
    pub const MP3: &str = "audio/mpeg";
    pub const MP4: &str = "video/mp4";
    pub const WEBM: &str = "video/webm";

    // Fonts
    pub const WOFF: &str = "font/woff";
    pub const WOFF2: &str = "font/woff2";
    pub const TTF: &str = "font/ttf";
    pub const OTF: &str = "font/otf";
}

/// Guess MIME type from a file path.
pub fn from_path(path: &Path) -> &'static str {
    from_extension(path.extension().and_then(|e| e.to_str()))
}

/// Guess MIME type from a file extension.
///
/// Returns a full MIME type string suitable for a Content-Type header.
pub fn from_extension(ext: Option<&str>) -> &'static str {
    match ext {
        // Web / Text
        Some("html" | "htm") => types::HTML,
        Some("css") => types::CSS,
        Some("js" | "mjs" | "cjs") => types::JAVASCRIPT,
        Some("json") => types::JSON,
        Some("xml") => types::XML,
        Some("txt") => types::PLAIN,
        Some("md") => types::MARKDOWN,

        // Images
        Some("svg") => types::SVG,
        Some("png") => types::PNG,
        Some("jpg" | "jpeg") => types::JPEG,
        Some("gif") => types::GIF,
        Some("webp") => types::WEBP,
        Some("avif") => types::AVIF,
        Some("ico") => types::ICO,

        // Media
        Some("mp3") => types::MP3,
        Some("mp4" | "m4v") => types::MP4,
        Some("webm") => types::WEBM,

        // Fonts
        Some("woff") => types::WOFF,
        Some("woff2") => types::WOFF2,
        Some("ttf") => types::TTF,
        Some("otf") => types::OTF,

        // Documents / Binary
        Some("pdf") => types::PDF,
        Some("wasm") => types::WASM,
        Some("zip") => types::ZIP,
        Some("gz" | "gzip") => types::GZIP,

        _ => types::OCTET_STREAM,
    }
}

/// Whether gzip is worth attempting for this MIME type.
///
/// Already-packed formats (images, fonts, archives, media) never shrink
/// enough to pay for the decode cost, so only textual types and a few
/// structured binary formats qualify.
pub fn is_compressible(mime: &str) -> bool {
    mime.starts_with("text/")
        || mime == types::JSON
        || mime == types::XML
        || mime == types::SVG
        || mime == types::WASM
}
