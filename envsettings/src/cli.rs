//! Command line overrides generated from the registry.
//!
//! Flags are derived from the declarations: boolean settings get a
//! `--flag` / `--no-flag` toggle pair (absence of a flag cannot express
//! "override true back to false"), every other setting gets a single
//! value-taking flag. Parsed flags are reduced to raw strings and fed into
//! the same coercion path as environment variables; layering the result
//! over [`ProcessEnv`](crate::ProcessEnv) gives CLI-over-environment
//! precedence.

use clap::{Arg, ArgAction, Command};
use indexmap::IndexMap;

use crate::env::EnvSource;
use crate::error::SettingsError;
use crate::registry::Settings;
use crate::value::TypeTag;

/// Raw override strings reduced from parsed command line flags.
///
/// Implements [`EnvSource`], keyed by declared setting name, so overrides
/// flow through the unchanged resolution path.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    values: IndexMap<String, String>,
}

impl CliOverrides {
    /// Parse command line arguments against a registry's declarations.
    ///
    /// `args` are the arguments without the binary name, as from
    /// `std::env::args().skip(1)`. Supplying both forms of a boolean
    /// toggle pair is rejected rather than guessed at.
    pub fn parse<I, S>(settings: &Settings, args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = build_command(settings)?;
        let matches = command
            .try_get_matches_from(args.into_iter().map(Into::into))
            .map_err(|e| SettingsError::CommandLine {
                message: e.to_string(),
            })?;

        let mut values = IndexMap::new();
        for decl in settings.declarations() {
            let flag = flag_name(decl.name());
            if matches!(decl.tag(), TypeTag::Bool) {
                let on = matches.get_flag(decl.name());
                let off = matches.get_flag(&negated_id(decl.name()));
                match (on, off) {
                    (true, true) => {
                        return Err(SettingsError::ConflictingFlags { flag });
                    }
                    (true, false) => {
                        values.insert(decl.name().to_string(), "true".to_string());
                    }
                    (false, true) => {
                        values.insert(decl.name().to_string(), "false".to_string());
                    }
                    (false, false) => {}
                }
            } else if let Some(raw) = matches.get_one::<String>(decl.name()) {
                values.insert(decl.name().to_string(), raw.clone());
            }
        }
        Ok(Self { values })
    }

    /// The reduced raw string for a setting, if its flag was given.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// (name, raw string) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl EnvSource for CliOverrides {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Argument names that collide with the parser's built-in options.
const RESERVED: [&str; 2] = ["help", "h"];

fn build_command(settings: &Settings) -> Result<Command, SettingsError> {
    let mut command = Command::new("settings").no_binary_name(true);
    let mut seen: IndexMap<String, String> = IndexMap::new();

    for decl in settings.declarations() {
        let flag = flag_name(decl.name());
        if RESERVED.contains(&flag.as_str()) {
            return Err(SettingsError::ReservedFlagName {
                name: decl.name().to_string(),
            });
        }
        if let Some(first) = seen.get(&flag) {
            return Err(SettingsError::DuplicateFlag {
                first: first.clone(),
                second: decl.name().to_string(),
                flag,
            });
        }
        seen.insert(flag.clone(), decl.name().to_string());

        if matches!(decl.tag(), TypeTag::Bool) {
            command = command
                .arg(
                    Arg::new(decl.name().to_string())
                        .long(flag.clone())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new(negated_id(decl.name()))
                        .long(format!("no-{flag}"))
                        .action(ArgAction::SetTrue),
                );
        } else {
            command = command.arg(
                Arg::new(decl.name().to_string())
                    .long(flag)
                    .action(ArgAction::Set)
                    .value_name("VALUE"),
            );
        }
    }
    Ok(command)
}

/// Flag spelling for a setting name: lowercase, underscores to hyphens.
fn flag_name(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}

/// Internal argument id for the negative form of a boolean toggle.
fn negated_id(name: &str) -> String {
    format!("no:{name}")
}
