//! Declarative typed settings from environment variables
//!
//! This library provides a declarative API for defining an application's
//! configuration as a set of named, typed, defaulted settings, then
//! resolving each read against environment variable (and optionally command
//! line) overrides with type-directed coercion of the raw strings.
//!
//! # Features
//!
//! - **Declarative**: Automatic schema implementation with `#[derive(EnvSettings)]`,
//!   or an explicit builder API
//! - **Type-directed coercion**: Booleans with multiple spellings, numbers,
//!   JSON lists and maps, dates and times, exact decimals, UUIDs, optional
//!   and union types
//! - **Inheritance**: Schemas extend other schemas; leaf declarations
//!   override by name
//! - **Live or frozen**: Reads re-resolve against the environment every
//!   time, or `freeze()` pins every value into an immutable snapshot
//! - **Command line toggles**: Boolean settings get `--flag` / `--no-flag`
//!   pairs; command line overrides shadow environment variables
//! - **Visible failures**: A present-but-malformed override is an error at
//!   the point of access, never silently replaced by the default
//!
//! # Value Coercion
//!
//! Raw override strings are converted according to the declared type tag:
//!
//! - Booleans: `DEBUG=true`, `DEBUG=1`, `DEBUG=yes`, `DEBUG=on` (any case)
//! - Numbers: `MAX_CONNECTIONS=42`, `RATE=3.14`
//! - Strings: taken verbatim
//! - Lists and maps: JSON, e.g. `TAGS=["a","b"]`, `LIMITS={"rps":100}`
//! - Dates and times: ISO-8601, e.g. `STARTS_AT=2024-12-25T15:30:45`
//! - Decimals: exact precision, e.g. `PRICE=19.99`
//! - UUIDs: hyphenated, bare hex, or braced
//! - Optional types: the literal `none` (any case) is the absent value
//!
//! # Example
//!
//! ```rust
//! use envsettings::EnvSettings;
//!
//! #[derive(EnvSettings)]
//! struct Config {
//!     #[setting(default = "localhost")]
//!     pub host: String,
//!
//!     #[setting(default = 8080)]
//!     pub port: u16,
//!
//!     #[setting(default = false)]
//!     pub debug: bool,
//!
//!     pub api_key: Option<String>,
//! }
//!
//! # fn main() -> Result<(), envsettings::SettingsError> {
//! std::env::set_var("PORT", "9090");
//!
//! let settings = Config::settings()?;
//! assert_eq!(settings.get("PORT")?.as_int(), Some(9090));
//! assert_eq!(settings.get("HOST")?.as_str(), Some("localhost"));
//! assert!(settings.get("API_KEY")?.is_none());
//! # std::env::remove_var("PORT");
//! # Ok(())
//! # }
//! ```
//!
//! # Snapshots
//!
//! Live reads observe environment changes as they happen. When a consistent
//! view matters, freeze one:
//!
//! ```rust
//! # use envsettings::{Settings, TypeTag};
//! # fn main() -> Result<(), envsettings::SettingsError> {
//! let settings = Settings::builder()
//!     .declare("GREETING", TypeTag::Str, "hello")
//!     .build()?;
//!
//! let snapshot = settings.freeze()?;
//! // Environment mutations after this point do not affect `snapshot`.
//! assert_eq!(snapshot.get("GREETING")?.as_str(), Some("hello"));
//! # Ok(())
//! # }
//! ```
//!
//! # Command Line Overrides
//!
//! ```rust,no_run
//! use envsettings::{CliOverrides, Layered, ProcessEnv, Settings, TypeTag};
//!
//! # fn main() -> Result<(), envsettings::SettingsError> {
//! let settings = Settings::builder()
//!     .declare("VERBOSE", TypeTag::Bool, true)
//!     .build()?;
//!
//! // `--no-verbose` overrides an environment-sourced "true" back to false
//! let cli = CliOverrides::parse(&settings, std::env::args().skip(1))?;
//! let snapshot = settings.freeze_from(&Layered::new(cli, ProcessEnv))?;
//! # Ok(())
//! # }
//! ```

mod cli;
mod coerce;
mod env;
mod error;
mod registry;
mod snapshot;
mod value;

pub use cli::CliOverrides;
pub use coerce::coerce;
pub use env::{EnvSource, Layered, MapEnv, ProcessEnv};
pub use error::{CoercionError, SettingsError};
pub use registry::{Declaration, Settings, SettingsBuilder, SettingsSchema};
pub use snapshot::Snapshot;
pub use value::{CustomType, TypeTag, Value};

pub use envsettings_derive::EnvSettings;
