//! Setting declarations, the registry builder, and override resolution.

use std::fmt;

use indexmap::IndexMap;

use crate::coerce::coerce;
use crate::env::{EnvSource, ProcessEnv};
use crate::error::SettingsError;
use crate::snapshot::Snapshot;
use crate::value::{TypeTag, Value};

/// A named, typed, defaulted setting.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    name: String,
    tag: TypeTag,
    default: Option<Value>,
}

impl Declaration {
    /// Declare a setting with a default value.
    pub fn new(name: impl Into<String>, tag: TypeTag, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            tag,
            default: Some(default.into()),
        }
    }

    /// Declare a setting with no default.
    ///
    /// Reading such a setting without an override yields [`Value::None`],
    /// or an error when the registry denies uninitialized reads.
    pub fn required(name: impl Into<String>, tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            tag,
            default: None,
        }
    }

    /// The setting name; also the exact override lookup key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type tag.
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// The declared default, or `None` when no default was supplied.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Schema types that can contribute declarations to a registry.
///
/// Implemented by `#[derive(EnvSettings)]`; `extend` attributes chain
/// schemas the way subclassing chains settings classes.
pub trait SettingsSchema {
    /// Declarations in base-to-leaf order.
    fn declarations() -> Vec<Declaration>;
}

/// Builder for a [`Settings`] registry.
///
/// Declarations are inserted in call order; redeclaring a name replaces the
/// earlier declaration wholesale (type and default together). Combined with
/// [`extend`](Self::extend) this gives override-by-name inheritance: base
/// declarations go in first, leaf declarations win on collision.
pub struct SettingsBuilder {
    decls: IndexMap<String, Declaration>,
    env: Option<Box<dyn EnvSource>>,
    deny_uninitialized: bool,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            decls: IndexMap::new(),
            env: None,
            deny_uninitialized: false,
        }
    }

    /// Insert every declaration of an existing registry, in its order.
    pub fn extend(mut self, base: &Settings) -> Self {
        for decl in base.declarations() {
            self = self.declaration(decl.clone());
        }
        self
    }

    /// Declare a setting with a default value.
    pub fn declare(self, name: impl Into<String>, tag: TypeTag, default: impl Into<Value>) -> Self {
        self.declaration(Declaration::new(name, tag, default))
    }

    /// Declare a setting with no default.
    pub fn declare_required(self, name: impl Into<String>, tag: TypeTag) -> Self {
        self.declaration(Declaration::required(name, tag))
    }

    /// Insert a prebuilt declaration, replacing any earlier one of the
    /// same name while keeping its original position.
    pub fn declaration(mut self, decl: Declaration) -> Self {
        self.decls.insert(decl.name().to_string(), decl);
        self
    }

    /// Use a custom override provider instead of the process environment.
    pub fn env_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.env = Some(Box::new(source));
        self
    }

    /// Error on reads of settings that have no default and no override,
    /// instead of yielding [`Value::None`].
    pub fn deny_uninitialized(mut self, deny: bool) -> Self {
        self.deny_uninitialized = deny;
        self
    }

    /// Validate the declarations and build the registry.
    ///
    /// Every supplied default must inhabit its declared type; mismatches
    /// are reported here rather than at first access.
    pub fn build(self) -> Result<Settings, SettingsError> {
        for decl in self.decls.values() {
            if let Some(default) = decl.default() {
                if !default.matches(decl.tag()) {
                    return Err(SettingsError::DefaultTypeMismatch {
                        name: decl.name().to_string(),
                        expected: decl.tag().name(),
                        got: default.type_name(),
                    });
                }
            }
        }
        Ok(Settings {
            decls: self.decls,
            env: self.env.unwrap_or_else(|| Box::new(ProcessEnv)),
            deny_uninitialized: self.deny_uninitialized,
        })
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The flattened, inheritance-resolved registry of declarations, plus the
/// override provider reads go through.
///
/// Logically immutable after construction. Reads are side-effect-free and
/// re-resolve against the provider on every call, so environment changes
/// during the process lifetime stay observable; use [`freeze`](Self::freeze)
/// to pin a consistent view instead.
pub struct Settings {
    decls: IndexMap<String, Declaration>,
    env: Box<dyn EnvSource>,
    deny_uninitialized: bool,
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    /// Build a registry for a derived schema against the process environment.
    pub fn from_schema<S: SettingsSchema>() -> Result<Self, SettingsError> {
        let mut builder = Self::builder();
        for decl in S::declarations() {
            builder = builder.declaration(decl);
        }
        builder.build()
    }

    /// Declarations in registration order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.values()
    }

    /// Look up a declaration by name.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.decls.get(name)
    }

    /// Whether a setting of this name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Resolve a setting against the registry's own provider.
    pub fn get(&self, name: &str) -> Result<Value, SettingsError> {
        self.get_from(name, self.env.as_ref())
    }

    /// Resolve a setting against an explicit provider.
    ///
    /// An undeclared name is an error even when the provider has a value
    /// for it; only declared settings are ever looked up. A present but
    /// malformed override is an error, never silently replaced by the
    /// default.
    pub fn get_from(&self, name: &str, env: &dyn EnvSource) -> Result<Value, SettingsError> {
        let decl = self
            .decls
            .get(name)
            .ok_or_else(|| SettingsError::unknown(name))?;
        match env.get(decl.name()) {
            Some(raw) => {
                coerce(&raw, decl.tag()).map_err(|e| SettingsError::coercion(decl.name(), e))
            }
            None => match decl.default() {
                Some(default) => Ok(default.clone()),
                None if self.deny_uninitialized => Err(SettingsError::Uninitialized {
                    name: decl.name().to_string(),
                }),
                None => Ok(Value::None),
            },
        }
    }

    /// Materialize every declared setting into an immutable snapshot.
    pub fn freeze(&self) -> Result<Snapshot, SettingsError> {
        self.freeze_from(self.env.as_ref())
    }

    /// Materialize every declared setting against an explicit provider.
    pub fn freeze_from(&self, env: &dyn EnvSource) -> Result<Snapshot, SettingsError> {
        let mut values = IndexMap::with_capacity(self.decls.len());
        for decl in self.decls.values() {
            let value = self.get_from(decl.name(), env)?;
            values.insert(decl.name().to_string(), value);
        }
        Ok(Snapshot::new(values))
    }

    /// Snapshot of only the settings that currently have an override.
    ///
    /// Settings resolved from their defaults are omitted; a malformed
    /// override still surfaces as an error.
    pub fn freeze_overrides(&self) -> Result<Snapshot, SettingsError> {
        self.freeze_overrides_from(self.env.as_ref())
    }

    /// Override-only snapshot against an explicit provider.
    pub fn freeze_overrides_from(&self, env: &dyn EnvSource) -> Result<Snapshot, SettingsError> {
        let mut values = IndexMap::new();
        for decl in self.decls.values() {
            if env.get(decl.name()).is_some() {
                let value = self.get_from(decl.name(), env)?;
                values.insert(decl.name().to_string(), value);
            }
        }
        Ok(Snapshot::new(values))
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("declarations", &self.decls)
            .field("deny_uninitialized", &self.deny_uninitialized)
            .finish_non_exhaustive()
    }
}
