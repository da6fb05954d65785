//! Asset minification transforms for JS and CSS.
//!
//! Uses oxc for JavaScript and lightningcss for CSS, packaged as
//! post-process hooks for entry compilation. Failures are explicit: an
//! entry is never silently served unminified.

use std::sync::Arc;

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use crate::entry::Transform;

/// Minify JavaScript source code.
pub fn minify_js(source: &str) -> Result<String, String> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return Err(format!("js parse failed: {:?}", ret.errors));
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Result<String, String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|e| format!("css parse failed: {e:?}"))?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| format!("css print failed: {e:?}"))?;
    Ok(result.code)
}

/// Post-process hook: minify JavaScript bytes.
pub fn js_transform() -> Transform {
    Arc::new(|bytes: &[u8]| {
        let source =
            std::str::from_utf8(bytes).map_err(|e| format!("js is not valid utf-8: {e}"))?;
        minify_js(source).map(String::into_bytes)
    })
}

/// Post-process hook: minify CSS bytes.
pub fn css_transform() -> Transform {
    Arc::new(|bytes: &[u8]| {
        let source =
            std::str::from_utf8(bytes).map_err(|e| format!("css is not valid utf-8: {e}"))?;
        minify_css(source).map(String::into_bytes)
    })
}
