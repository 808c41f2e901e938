//! Key-value providers for override lookup.
//!
//! Resolution never reads `std::env` directly; it goes through an
//! [`EnvSource`] so tests can supply a synthetic environment without
//! mutating process state, and so command line overrides can be layered
//! on top of the real environment.

use indexmap::IndexMap;

/// Source of raw override values, keyed by setting name.
pub trait EnvSource: Send + Sync {
    /// Get the raw value for a setting name, if present.
    fn get(&self, name: &str) -> Option<String>;
}

/// Source that reads the actual process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Map-backed source, for tests and synthetic environments.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: IndexMap<String, String>,
}

impl MapEnv {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from an iterator of key-value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Remove a variable.
    pub fn remove(&mut self, name: &str) {
        self.vars.shift_remove(name);
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Layers a higher-precedence source over a base source.
///
/// Lookup tries `top` first and falls back to `base`; this is how command
/// line overrides shadow environment variables while flowing through the
/// same resolution path.
#[derive(Debug, Clone)]
pub struct Layered<T, U> {
    top: T,
    base: U,
}

impl<T: EnvSource, U: EnvSource> Layered<T, U> {
    /// Layer `top` over `base`.
    pub fn new(top: T, base: U) -> Self {
        Self { top, base }
    }
}

impl<T: EnvSource, U: EnvSource> EnvSource for Layered<T, U> {
    fn get(&self, name: &str) -> Option<String> {
        self.top.get(name).or_else(|| self.base.get(name))
    }
}
