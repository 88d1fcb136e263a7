//! Dependency registry — the flat name→value store.
//!
//! Every resolution writes here, and every lookup reads here. Names are
//! unique; writing an existing name overwrites it (last write wins), and
//! there is no removal. Iteration order is insertion order, which makes
//! `find` results deterministic.

use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, trace};

use crate::value::Value;

/// Stores resolved dependencies by name.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    entries: IndexMap<String, Value>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Stores `value` under `name`, unconditionally.
    pub fn register(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        let replaced = self.entries.insert(name.clone(), value).is_some();
        debug!(name = %name, replaced, "Registered dependency");
    }

    /// Looks up a dependency by exact name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        trace!(name = %name, "Registry lookup");
        self.entries.get(name)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Tests `pattern` against every registered name, in insertion order.
    ///
    /// Returns `None` when nothing matches. With `single` set, the first
    /// matching value; otherwise a [`Value::List`] of every match — a
    /// lone match still comes back as a one-element list.
    pub fn find(&self, pattern: &Regex, single: bool) -> Option<Value> {
        let mut matches = self
            .entries
            .iter()
            .filter(|(name, _)| pattern.is_match(name))
            .map(|(_, value)| value.clone());

        if single {
            return matches.next();
        }

        let matches: Vec<Value> = matches.collect();
        if matches.is_empty() {
            None
        } else {
            Some(Value::List(matches))
        }
    }

    /// Clones the current contents for a loader injection context.
    pub fn snapshot(&self) -> IndexMap<String, Value> {
        self.entries.clone()
    }

    /// Number of registered dependencies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
