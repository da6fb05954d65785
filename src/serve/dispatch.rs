//! Request dispatch over the engine's mount points.
//!
//! A state machine over the first path segment: `res` serves from the
//! entry table (or dev cache), `widget` delegates to the disk-backed
//! widget store, anything else is 404 with no body. Runs synchronously per
//! request; the dev cache is the only shared mutable state.

use anyhow::Result;
use tiny_http::Request;

use super::response;
use crate::engine::Engine;
use crate::log;
use crate::path::LogicalPath;
use crate::route::{RES_MOUNT, WIDGET_MOUNT};

/// Route one request through the engine.
pub fn handle(engine: &Engine, request: Request) -> Result<()> {
    // Owned copy: the request moves into the responder while the split
    // still refers to the url
    let url = request.url().to_string();
    let (first, rest) = split_mount(&url);
    match first {
        Some(RES_MOUNT) => handle_res(engine, request, rest),
        Some(WIDGET_MOUNT) => handle_widget(engine, request, rest),
        _ => response::respond_empty(request, 404),
    }
}

/// Split the raw request url into its first path segment and the remainder
/// (query string still attached to the remainder).
fn split_mount(url: &str) -> (Option<&str>, &str) {
    let path = url.trim_start_matches('/');
    match path.split_once('/') {
        Some((first, rest)) => (Some(first), rest),
        None if !path.is_empty() => (Some(path), ""),
        None => (None, ""),
    }
}

fn handle_res(engine: &Engine, request: Request, rest: &str) -> Result<()> {
    let Some(path) = LogicalPath::from_request(rest) else {
        return response::respond_empty(request, 404);
    };
    match engine.lookup(&path) {
        Ok(Some(entry)) => response::respond_entry(request, &entry),
        Ok(None) => response::respond_empty(request, 404),
        // Scoped to this request; the shared table and cache are untouched
        Err(e) => {
            log!("serve"; "error serving /{RES_MOUNT}/{path}: {e}");
            response::respond_error(request, &format!("{e:#}"))
        }
    }
}

fn handle_widget(engine: &Engine, request: Request, rest: &str) -> Result<()> {
    let Some(path) = LogicalPath::from_request(rest) else {
        return response::respond_empty(request, 404);
    };
    match engine.widgets().resolve(&path) {
        Some(file) => response::respond_widget_file(request, file),
        None => response::respond_empty(request, 404),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_mount() {
        assert_eq!(split_mount("/res/css/app.css"), (Some("res"), "css/app.css"));
        assert_eq!(split_mount("/widget/combined.js"), (Some("widget"), "combined.js"));
        assert_eq!(split_mount("/res"), (Some("res"), ""));
        assert_eq!(split_mount("/other/thing"), (Some("other"), "thing"));
        assert_eq!(split_mount("/"), (None, ""));
        assert_eq!(split_mount(""), (None, ""));
    }

    #[test]
    fn test_split_mount_keeps_query_in_rest() {
        assert_eq!(
            split_mount("/res/js/app.js?v=3"),
            (Some("res"), "js/app.js?v=3")
        );
    }
}
