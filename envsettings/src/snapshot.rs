//! Point-in-time materialization of resolved values.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::SettingsError;
use crate::value::Value;

/// An immutable bag of resolved values captured at one instant.
///
/// A snapshot owns its values outright; mutating the environment after
/// `freeze()` does not change anything already captured. Useful for
/// dependency injection and for read consistency across threads while the
/// environment may be mutated externally.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    values: IndexMap<String, Value>,
}

impl Snapshot {
    pub(crate) fn new(values: IndexMap<String, Value>) -> Self {
        Self { values }
    }

    /// Get a captured value by name.
    pub fn get(&self, name: &str) -> Result<&Value, SettingsError> {
        self.values
            .get(name)
            .ok_or_else(|| SettingsError::UnknownSetting {
                name: name.to_string(),
            })
    }

    /// Whether a value of this name was captured.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Captured names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Captured (name, value) pairs, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
