//! Build-time route code generation.
//!
//! Deliberately decoupled from the hashing/serving engine: a host build
//! script runs the generator list (or a full [`crate::Engine::build`]),
//! takes the resulting routes, and writes the emitted module into
//! `OUT_DIR`:
//!
//! ```ignore
//! // build.rs
//! let out = std::path::Path::new(&std::env::var("OUT_DIR")?).join("routes.rs");
//! amber::codegen::write_routes_module(engine.routes(), &out)?;
//! ```
//!
//! ```ignore
//! // src/assets.rs
//! include!(concat!(env!("OUT_DIR"), "/routes.rs"));
//! let href = APP_CSS.href(); // "/res/css/app.css"
//! ```

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::route::Route;

/// Emit a Rust module binding each route to a typed constant.
///
/// Binding names are sanitized to `SCREAMING_SNAKE_CASE` identifiers;
/// uniqueness was already enforced when the generator list ran.
pub fn routes_module(routes: &[Route]) -> String {
    let mut out = String::new();
    out.push_str("// Generated route bindings. Do not edit.\n\n");
    for route in routes {
        let _ = writeln!(
            out,
            "pub const {}: ::amber::StaticRoute = ::amber::StaticRoute::new({:?});",
            const_ident(route.name()),
            route.path().as_str(),
        );
    }
    out
}

/// One manifest record per bound route, for non-Rust consumers.
#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    name: &'a str,
    path: &'a str,
    href: String,
}

/// Emit a JSON manifest of all bound routes, in registration order.
pub fn routes_manifest(routes: &[Route]) -> serde_json::Result<String> {
    let records: Vec<ManifestEntry<'_>> = routes
        .iter()
        .map(|route| ManifestEntry {
            name: route.name(),
            path: route.path().as_str(),
            href: route.href(),
        })
        .collect();
    serde_json::to_string_pretty(&records)
}

/// Write the generated module, for inclusion from a host build script.
pub fn write_routes_module(routes: &[Route], out: &Path) -> std::io::Result<()> {
    std::fs::write(out, routes_module(routes))
}

/// Sanitize a binding name into a `SCREAMING_SNAKE_CASE` const identifier.
fn const_ident(name: &str) -> String {
    let mut ident = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            ident.push(ch.to_ascii_uppercase());
        } else {
            ident.push('_');
        }
    }
    if ident.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::LogicalPath;

    fn route(name: &str, path: &str) -> Route {
        Route::new(name, LogicalPath::new(path).unwrap())
    }

    #[test]
    fn test_const_ident() {
        assert_eq!(const_ident("app_css"), "APP_CSS");
        assert_eq!(const_ident("hot-reload.js"), "HOT_RELOAD_JS");
        assert_eq!(const_ident("2col"), "_2COL");
        assert_eq!(const_ident(""), "_");
    }

    #[test]
    fn test_routes_module_emits_consts() {
        let routes = vec![
            route("app_css", "css/app.css"),
            route("logo", "img/logo.svg"),
        ];
        let module = routes_module(&routes);
        assert!(module.contains(
            "pub const APP_CSS: ::amber::StaticRoute = ::amber::StaticRoute::new(\"css/app.css\");"
        ));
        assert!(module.contains(
            "pub const LOGO: ::amber::StaticRoute = ::amber::StaticRoute::new(\"img/logo.svg\");"
        ));
    }

    #[test]
    fn test_routes_manifest_preserves_order() {
        let routes = vec![route("b", "b.txt"), route("a", "a.txt")];
        let manifest = routes_manifest(&routes).unwrap();
        let b_pos = manifest.find("\"b\"").unwrap();
        let a_pos = manifest.find("\"a\"").unwrap();
        assert!(b_pos < a_pos);
        assert!(manifest.contains("\"href\": \"/res/b.txt\""));
    }

    #[test]
    fn test_write_routes_module() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("routes.rs");
        write_routes_module(&[route("app", "app.js")], &out).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("pub const APP"));
    }
}
