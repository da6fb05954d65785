//! Route values for link generation.
//!
//! A route identifies one entry's logical path and produces hrefs under the
//! engine mount, so hosts never hard-code entry URLs. [`Route`] is the
//! runtime value derived from a binding name; [`StaticRoute`] is its
//! const-constructible counterpart emitted by [`crate::codegen`].

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::path::LogicalPath;

/// First path segment for embedded resource requests.
pub const RES_MOUNT: &str = "res";
/// First path segment for widget (auxiliary) file requests.
pub const WIDGET_MOUNT: &str = "widget";

/// Percent-encode everything except RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Link value for one embedded entry, derived from its binding name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    name: String,
    path: LogicalPath,
}

impl Route {
    pub(crate) fn new(name: impl Into<String>, path: LogicalPath) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }

    /// The binding name this route was declared under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &LogicalPath {
        &self.path
    }

    /// Absolute href under the engine mount, e.g. `/res/css/app.css`.
    pub fn href(&self) -> String {
        href_for(self.path.as_str())
    }

    /// Href with query parameters appended, percent-encoded.
    pub fn href_with<'a, I>(&self, params: I) -> String
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        href_with_params(self.path.as_str(), params)
    }
}

/// Const-constructible route for code generated at build time.
///
/// The emitted constants point at logical paths that were validated when
/// the generator list ran, so construction is infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticRoute {
    path: &'static str,
}

impl StaticRoute {
    pub const fn new(path: &'static str) -> Self {
        Self { path }
    }

    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Absolute href under the engine mount.
    pub fn href(&self) -> String {
        href_for(self.path)
    }

    /// Href with query parameters appended, percent-encoded.
    pub fn href_with<'a, I>(&self, params: I) -> String
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        href_with_params(self.path, params)
    }
}

fn href_for(path: &str) -> String {
    let encoded = path
        .split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/");
    format!("/{RES_MOUNT}/{encoded}")
}

fn href_with_params<'a, I>(path: &str, params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut href = href_for(path);
    let mut sep = '?';
    for (key, value) in params {
        href.push(sep);
        href.push_str(&encode_component(key));
        href.push('=');
        href.push_str(&encode_component(value));
        sep = '&';
    }
    href
}

fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, path: &str) -> Route {
        Route::new(name, LogicalPath::new(path).unwrap())
    }

    #[test]
    fn test_href() {
        assert_eq!(route("app", "css/app.css").href(), "/res/css/app.css");
    }

    #[test]
    fn test_href_encodes_segments() {
        assert_eq!(
            route("odd", "img/hello world.png").href(),
            "/res/img/hello%20world.png"
        );
    }

    #[test]
    fn test_href_with_params() {
        let href = route("app", "js/app.js").href_with([("v", "3"), ("lang", "en us")]);
        assert_eq!(href, "/res/js/app.js?v=3&lang=en%20us");
    }

    #[test]
    fn test_href_with_no_params() {
        let href = route("app", "js/app.js").href_with([]);
        assert_eq!(href, "/res/js/app.js");
    }

    #[test]
    fn test_static_route_matches_runtime_route() {
        const APP_CSS: StaticRoute = StaticRoute::new("css/app.css");
        assert_eq!(APP_CSS.href(), route("app", "css/app.css").href());
        assert_eq!(APP_CSS.path(), "css/app.css");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&route("app_css", "css/app.css")).unwrap();
        assert_eq!(json, r#"{"name":"app_css","path":"css/app.css"}"#);
    }
}
