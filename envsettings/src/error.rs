//! Error types for settings declaration, resolution, and coercion.

/// Errors produced by the type coercion engine.
///
/// Coercion never falls back to a default value: a present-but-malformed
/// override indicates a configuration mistake the operator must fix, so
/// every failure is surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CoercionError {
    /// The raw string is not one of the recognized boolean spellings.
    #[error("'{value}' is not a valid boolean (expected one of: true, false, 1, 0, yes, no, on, off)")]
    InvalidBool {
        /// The raw override string
        value: String,
    },

    /// The raw string could not be parsed as the expected scalar type.
    #[error("'{value}' is not a valid {expected}: {message}")]
    InvalidScalar {
        /// The raw override string
        value: String,
        /// Human-readable name of the expected type (e.g. "int", "uuid")
        expected: &'static str,
        /// Error message from the underlying parser
        message: String,
    },

    /// The raw string is not valid JSON.
    ///
    /// The message carries operator hints for the common mistakes (single
    /// quotes, empty values) in addition to the parser's own diagnostics.
    #[error("invalid JSON for {expected}: {message}")]
    InvalidJson {
        /// Expected JSON shape ("array" or "object")
        expected: &'static str,
        /// Parser message, possibly with a usage hint appended
        message: String,
    },

    /// The raw string is valid JSON but decodes to the wrong shape.
    #[error("JSON type mismatch: expected {expected}, got {got}")]
    JsonShape {
        /// Expected JSON shape ("array" or "object")
        expected: &'static str,
        /// Shape the value actually decoded to
        got: &'static str,
    },

    /// The raw string failed coercion against every member of a union.
    #[error("'{value}' cannot be coerced to any union member: [{}]", fmt_attempts(.attempts))]
    UnionExhausted {
        /// The raw override string
        value: String,
        /// Every (member type name, failure message) pair, in attempt order
        attempts: Vec<(String, String)>,
    },
}

fn fmt_attempts(attempts: &[(String, String)]) -> String {
    attempts
        .iter()
        .map(|(tag, message)| format!("{tag}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur when building a registry or resolving a setting.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Access of a name absent from the registry.
    ///
    /// Raised even when an environment variable of that name exists: only
    /// declared settings are ever looked up.
    #[error("unknown setting '{name}'")]
    UnknownSetting {
        /// The name that was accessed
        name: String,
    },

    /// An override was present but could not be coerced to the declared type.
    #[error("invalid value for setting '{name}': {source}")]
    Coercion {
        /// Name of the setting being resolved
        name: String,
        /// The underlying coercion failure
        source: CoercionError,
    },

    /// A declared default value does not match the declared type.
    ///
    /// Detected eagerly when the registry is built, not at first access.
    #[error("default value for setting '{name}' is {got}, expected {expected}")]
    DefaultTypeMismatch {
        /// Name of the offending declaration
        name: String,
        /// Name of the declared type tag
        expected: String,
        /// Type name of the supplied default value
        got: &'static str,
    },

    /// A setting with no declared default was read with no override present.
    ///
    /// Only raised when the registry was built with `deny_uninitialized`;
    /// otherwise such reads yield `Value::None`.
    #[error("setting '{name}' has no default and no override")]
    Uninitialized {
        /// Name of the setting being resolved
        name: String,
    },

    /// Both the positive and negative form of a boolean flag were supplied.
    #[error("conflicting command line flags: both --{flag} and --no-{flag} were given")]
    ConflictingFlags {
        /// The positive flag name (without leading dashes)
        flag: String,
    },

    /// A setting name reduces to a flag reserved by the argument parser.
    #[error("setting '{name}' conflicts with a built-in command line option")]
    ReservedFlagName {
        /// Name of the offending declaration
        name: String,
    },

    /// Two declarations reduce to the same command line flag.
    #[error("settings '{first}' and '{second}' both map to the --{flag} flag")]
    DuplicateFlag {
        /// Name of the earlier declaration
        first: String,
        /// Name of the later declaration
        second: String,
        /// The colliding flag name (without leading dashes)
        flag: String,
    },

    /// The command line arguments could not be parsed.
    #[error("{message}")]
    CommandLine {
        /// The argument parser's rendered error
        message: String,
    },
}

impl SettingsError {
    /// Create an unknown-setting error.
    pub(crate) fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownSetting { name: name.into() }
    }

    /// Wrap a coercion failure with the setting name it occurred on.
    pub(crate) fn coercion(name: impl Into<String>, source: CoercionError) -> Self {
        Self::Coercion {
            name: name.into(),
            source,
        }
    }
}
