//! Amber - embedded static asset engine.
//!
//! Compiles a declarative list of generators into a table of hashed,
//! optionally pre-compressed entries baked into the binary, then serves them
//! over HTTP with content-addressed caching: the ETag is the blake3 hash of
//! the body, so clients may cache aggressively (`Cache-Control: immutable`)
//! and revalidate with `If-None-Match`.
//!
//! Two operating modes, chosen once at engine construction:
//!
//! - [`Mode::Production`]: every entry is compiled when the engine is built;
//!   serving is a pure table lookup with no filesystem access.
//! - [`Mode::Development`]: entries are compiled on first request and cached
//!   for the process lifetime; restart the process to pick up source edits.
//!
//! # Example
//!
//! ```ignore
//! use amber::generator::{DirGenerator, FileGenerator};
//! use amber::{BuildEnv, Engine, Mode};
//!
//! let env = BuildEnv::new("site");
//! let engine = Engine::build(
//!     vec![
//!         Box::new(FileGenerator::new("css/app.css").with_binding("app_css")),
//!         Box::new(DirGenerator::new("images")),
//!     ],
//!     Mode::Production,
//!     &env,
//! )?;
//!
//! let server = amber::serve::bind("127.0.0.1".parse()?, 8080)?;
//! server.run(engine.into())?;
//! ```

pub mod codegen;
pub mod engine;
pub mod entry;
pub mod error;
pub mod generator;
pub mod hash;
pub mod logger;
pub mod minify;
pub mod path;
pub mod route;
pub mod serve;
pub mod utils;

pub use engine::{DevCache, Engine, Mode, StaticTable, WidgetStore};
pub use entry::{ComputedEntry, ContentSource, RawEntry, Transform};
pub use error::{Error, Result};
pub use generator::{BuildEnv, Generator};
pub use hash::ContentHash;
pub use path::LogicalPath;
pub use route::{Route, StaticRoute};
