//! HTTP response construction.
//!
//! Content delivery for computed entries: conditional-GET short-circuiting
//! on the content-hash ETag, gzip body selection against `Accept-Encoding`,
//! and immutable cache-control. Never fails on valid input; everything that
//! could go wrong was rejected at compile time.

use std::fs;
use std::path::Path;

use anyhow::Result;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::entry::ComputedEntry;
use crate::utils::mime;

/// Clients may cache bodies forever: the ETag is the content hash, so any
/// content change necessarily produces a new validator.
const CACHE_FOREVER: &str = "public, max-age=31536000, immutable";

/// Serve a computed entry with conditional-GET and encoding selection.
pub fn respond_entry(request: Request, entry: &ComputedEntry) -> Result<()> {
    let etag = entry.etag();

    if if_none_match(&request).is_some_and(|client| etag_matches(&client, &etag)) {
        return respond_not_modified(request, &etag);
    }

    let gzip = entry.gzip().filter(|_| accepts_gzip(&request));

    if is_head_request(&request) {
        let mut response = Response::empty(StatusCode(200))
            .with_header(make_header("Content-Type", entry.mime()))
            .with_header(make_header("ETag", &etag))
            .with_header(make_header("Cache-Control", CACHE_FOREVER));
        if gzip.is_some() {
            response = response.with_header(make_header("Content-Encoding", "gzip"));
        }
        return request.respond(response).map_err(Into::into);
    }

    let body = gzip.unwrap_or_else(|| entry.bytes()).to_vec();
    let mut response = Response::from_data(body)
        .with_status_code(StatusCode(200))
        .with_header(make_header("Content-Type", entry.mime()))
        .with_header(make_header("ETag", &etag))
        .with_header(make_header("Cache-Control", CACHE_FOREVER));
    if gzip.is_some() {
        response = response.with_header(make_header("Content-Encoding", "gzip"));
    }
    request.respond(response).map_err(Into::into)
}

/// 304: validators and caching headers only, no body.
fn respond_not_modified(request: Request, etag: &str) -> Result<()> {
    let response = Response::empty(StatusCode(304))
        .with_header(make_header("ETag", etag))
        .with_header(make_header("Cache-Control", CACHE_FOREVER));
    request.respond(response).map_err(Into::into)
}

/// Status-only response with an empty body.
pub fn respond_empty(request: Request, status: u16) -> Result<()> {
    request
        .respond(Response::empty(StatusCode(status)))
        .map_err(Into::into)
}

/// 500 with a plain-text reason.
pub fn respond_error(request: Request, message: &str) -> Result<()> {
    let response = Response::from_data(message.as_bytes().to_vec())
        .with_status_code(StatusCode(500))
        .with_header(make_header("Content-Type", mime::types::PLAIN));
    request.respond(response).map_err(Into::into)
}

/// Serve a widget file live from disk.
pub fn respond_widget_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);

    let body = match fs::read(path) {
        Ok(body) => body,
        // Registered but unreadable: a server error, not a 404
        Err(e) => return respond_error(request, &format!("cannot read {}: {e}", path.display())),
    };

    if is_head_request(&request) {
        let response =
            Response::empty(StatusCode(200)).with_header(make_header("Content-Type", content_type));
        return request.respond(response).map_err(Into::into);
    }

    let response = Response::from_data(body)
        .with_status_code(StatusCode(200))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response).map_err(Into::into)
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

/// Header values here are ASCII by construction (constants, MIME strings,
/// hex digests), so conversion cannot fail.
fn make_header(key: &str, value: &str) -> Header {
    Header::from_bytes(key, value).unwrap()
}

fn header_value(request: &Request, field: &str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(field))
        .map(|h| h.value.to_string())
}

fn if_none_match(request: &Request) -> Option<String> {
    header_value(request, "if-none-match")
}

/// ETag comparison over a client `If-None-Match` list (`*` matches any).
fn etag_matches(client: &str, etag: &str) -> bool {
    client
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate == etag)
}

fn accepts_gzip(request: &Request) -> bool {
    header_value(request, "accept-encoding").is_some_and(|value| gzip_allowed(&value))
}

/// Parse an `Accept-Encoding` value; `gzip;q=0` disables gzip.
fn gzip_allowed(value: &str) -> bool {
    value.split(',').any(|part| {
        let mut pieces = part.trim().split(';');
        let coding = pieces.next().unwrap_or("").trim();
        if !coding.eq_ignore_ascii_case("gzip") && coding != "*" {
            return false;
        }
        match pieces.next().and_then(|q| q.trim().strip_prefix("q=")) {
            Some(q) => q.trim().parse::<f32>().map(|q| q > 0.0).unwrap_or(true),
            None => true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_matches_exact() {
        assert!(etag_matches("\"abc\"", "\"abc\""));
        assert!(!etag_matches("\"abc\"", "\"def\""));
    }

    #[test]
    fn test_etag_matches_list() {
        assert!(etag_matches("\"one\", \"two\", \"three\"", "\"two\""));
        assert!(!etag_matches("\"one\", \"two\"", "\"three\""));
    }

    #[test]
    fn test_etag_matches_star() {
        assert!(etag_matches("*", "\"anything\""));
    }

    #[test]
    fn test_gzip_allowed() {
        assert!(gzip_allowed("gzip"));
        assert!(gzip_allowed("gzip, deflate, br"));
        assert!(gzip_allowed("deflate, gzip;q=0.5"));
        assert!(gzip_allowed("*"));
        assert!(gzip_allowed("GZIP"));
    }

    #[test]
    fn test_gzip_refused() {
        assert!(!gzip_allowed("deflate, br"));
        assert!(!gzip_allowed("gzip;q=0"));
        assert!(!gzip_allowed("identity"));
        assert!(!gzip_allowed(""));
    }
}
