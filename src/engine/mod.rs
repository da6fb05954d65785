//! Engine construction and lookup.
//!
//! The engine is the single value a host owns and shares across requests.
//! Its state is a tagged variant selected once at construction: production
//! carries the fully precomputed static table, development carries the raw
//! entry list plus a lazily-populated cache.

mod dev_cache;
mod table;
mod widget;

pub use dev_cache::DevCache;
pub use table::StaticTable;
pub use widget::WidgetStore;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::debug;
use crate::entry::{ComputedEntry, ContentSource, RawEntry, compile};
use crate::error::{Error, Result};
use crate::generator::{BuildEnv, Generator, collect_entries};
use crate::path::LogicalPath;
use crate::route::Route;

/// Operating mode, selected once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Compile every entry at build time; serve from the immutable table.
    Production,
    /// Compile entries on first request; restart to pick up source edits.
    Development,
}

enum State {
    Production(StaticTable),
    Development {
        entries: FxHashMap<LogicalPath, RawEntry>,
        cache: DevCache,
    },
}

/// Embedded asset engine: one instance per process, shared across requests.
pub struct Engine {
    state: State,
    widgets: WidgetStore,
    routes: Vec<Route>,
}

impl Engine {
    /// Run `generators` and assemble the engine for `mode`.
    ///
    /// Fails on unreadable sources, failing transforms, duplicate logical
    /// paths and duplicate binding names. None of these are recoverable at
    /// runtime, so construction is the only place they may surface.
    pub fn build(
        generators: Vec<Box<dyn Generator>>,
        mode: Mode,
        env: &BuildEnv,
    ) -> Result<Self> {
        let raw = collect_entries(&generators, env)?;

        let mut routes = Vec::new();
        let mut widgets = WidgetStore::default();
        let mut compiled = Vec::new();
        let mut dev_entries = FxHashMap::default();

        for entry in raw {
            if let Some(name) = entry.binding() {
                routes.push(Route::new(name, entry.path().clone()));
            }
            if entry.is_widget() {
                let ContentSource::File(file) = entry.source() else {
                    return Err(Error::WidgetSource(entry.path().clone()));
                };
                widgets.register(entry.path().clone(), file.clone());
                // In development, widget files bypass the entry table and
                // are served live from disk; in production they embed like
                // any other entry.
                if mode == Mode::Development {
                    continue;
                }
            }
            match mode {
                Mode::Production => compiled.push(compile(&entry)?),
                Mode::Development => {
                    dev_entries.insert(entry.path().clone(), entry);
                }
            }
        }

        let state = match mode {
            Mode::Production => {
                let table = StaticTable::from_entries(compiled);
                debug!("build"; "embedded {} entries, {} routes", table.len(), routes.len());
                State::Production(table)
            }
            Mode::Development => {
                debug!("build"; "registered {} entries for lazy compilation", dev_entries.len());
                State::Development {
                    entries: dev_entries,
                    cache: DevCache::new(),
                }
            }
        };

        Ok(Self {
            state,
            widgets,
            routes,
        })
    }

    pub fn mode(&self) -> Mode {
        match &self.state {
            State::Production(_) => Mode::Production,
            State::Development { .. } => Mode::Development,
        }
    }

    /// Look up a computed entry by logical path.
    ///
    /// Production never touches the filesystem. Development compiles on the
    /// first request for a path; the compile runs outside any cache lock,
    /// and racing requests for the same path converge on whichever entry
    /// was inserted first (both are content-equal). Compile errors are
    /// returned and never cached, so a path recovers as soon as its source
    /// does.
    pub fn lookup(&self, path: &LogicalPath) -> Result<Option<Arc<ComputedEntry>>> {
        match &self.state {
            State::Production(table) => Ok(table.get(path)),
            State::Development { entries, cache } => {
                if let Some(entry) = cache.get(path) {
                    return Ok(Some(entry));
                }
                let Some(raw) = entries.get(path) else {
                    return Ok(None);
                };
                let computed = Arc::new(compile(raw)?);
                Ok(Some(cache.insert_if_absent(path.clone(), computed)))
            }
        }
    }

    /// Registered widget files.
    pub fn widgets(&self) -> &WidgetStore {
        &self.widgets
    }

    /// Routes for entries that declared a binding, in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find a route by binding name.
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name() == name)
    }

    /// Number of entries in the lookup space.
    pub fn entry_count(&self) -> usize {
        match &self.state {
            State::Production(table) => table.len(),
            State::Development { entries, .. } => entries.len(),
        }
    }
}
