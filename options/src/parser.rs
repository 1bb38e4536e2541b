//! Parsing argv and environment variables against an [`OptionSchema`].
//!
//! The schema is translated into a [`clap::Command`] with clap's own help
//! and version flags turned off, so `--help` and `--version` reach the
//! pre-validation gate like any other switch. Values are then layered:
//! command line first, bound environment variables second, schema defaults
//! last.

use std::collections::BTreeMap;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use dbshell_options_core::{
    Arity, OptionDescriptor, OptionSchema, ParsedEnvironment, Source, Value, ValueKind,
};
use thiserror::Error;

/// Program name used when argv is empty.
pub const DEFAULT_PROGRAM: &str = "dbshell";

/// Errors raised while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The command line does not fit the schema.
    #[error("{0}")]
    Rejected(String),
    /// A bound environment variable holds an unusable value.
    #[error("invalid value {value:?} for environment variable {var}")]
    InvalidEnvironment {
        /// Variable name.
        var: String,
        /// Offending value.
        value: String,
    },
}

impl From<clap::Error> for ParseError {
    fn from(err: clap::Error) -> Self {
        let rendered = err.to_string();
        let reason = rendered.lines().next().unwrap_or_default();
        ParseError::Rejected(reason.trim_start_matches("error: ").to_string())
    }
}

/// Returns the invocation name, `argv[0]`.
pub fn program_name(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or(DEFAULT_PROGRAM)
}

/// Parses `args` (including `argv[0]`) and `env_vars` against `schema`.
///
/// # Errors
///
/// Returns [`ParseError::Rejected`] for malformed command lines and
/// [`ParseError::InvalidEnvironment`] for unusable bound variables.
pub fn parse(
    schema: &OptionSchema,
    args: &[String],
    env_vars: &BTreeMap<String, String>,
) -> Result<ParsedEnvironment, ParseError> {
    let matches = command_for(schema, program_name(args)).try_get_matches_from(args)?;

    let mut env = ParsedEnvironment::new();
    for option in schema.options() {
        if let Some(value) = command_line_value(&matches, option) {
            env.insert(&option.name, value, Source::CommandLine);
        } else if let Some(value) = environment_value(option, env_vars)? {
            env.insert(&option.name, value, Source::Environment);
        } else if let Some(default) = &option.default_value {
            env.insert(&option.name, default.clone(), Source::Default);
        }
    }

    Ok(env)
}

/// Translates `schema` into a clap command.
pub fn command_for(schema: &OptionSchema, program: &str) -> Command {
    let mut command = Command::new(program.to_string())
        .disable_help_flag(true)
        .disable_version_flag(true);

    for option in schema.options() {
        let arg = match schema.find_positional(&option.name) {
            Some((index, positional)) => positional_arg(option, index + 1, positional.arity),
            None => flag_arg(option),
        };
        command = command.arg(arg);
    }
    command
}

fn flag_arg(option: &OptionDescriptor) -> Arg {
    let mut arg = Arg::new(option.name.clone())
        .long(option.long.clone())
        .hide(option.is_hidden());
    if let Some(short) = option.short {
        arg = arg.short(short);
    }

    match option.kind {
        ValueKind::Switch => arg.action(ArgAction::SetTrue),
        ValueKind::String => {
            let arg = arg.action(ArgAction::Set).num_args(1);
            match option.implicit_value.as_ref().and_then(Value::as_str) {
                Some(implicit) => arg
                    .num_args(0..=1)
                    .default_missing_value(implicit.to_string()),
                None => arg,
            }
        }
        ValueKind::StringList => arg.action(ArgAction::Append).num_args(1),
    }
}

fn positional_arg(option: &OptionDescriptor, index: usize, arity: Arity) -> Arg {
    let arg = Arg::new(option.name.clone())
        .index(index)
        .value_name(option.name.clone())
        .hide(option.is_hidden());

    match arity {
        Arity::Exactly(1) => arg.action(ArgAction::Set).num_args(1),
        Arity::Exactly(n) => arg.action(ArgAction::Append).num_args(n),
        Arity::Unbounded => arg.action(ArgAction::Append).num_args(1..),
    }
}

fn command_line_value(matches: &ArgMatches, option: &OptionDescriptor) -> Option<Value> {
    let name = option.name.as_str();
    if matches.value_source(name) != Some(ValueSource::CommandLine) {
        return None;
    }

    match option.kind {
        ValueKind::Switch => Some(Value::Switch(matches.get_flag(name))),
        ValueKind::String => matches.get_one::<String>(name).cloned().map(Value::String),
        ValueKind::StringList => matches
            .get_many::<String>(name)
            .map(|values| Value::StringList(values.cloned().collect())),
    }
}

fn environment_value(
    option: &OptionDescriptor,
    env_vars: &BTreeMap<String, String>,
) -> Result<Option<Value>, ParseError> {
    let Some(var) = option.env.as_deref() else {
        return Ok(None);
    };
    let Some(raw) = env_vars.get(var) else {
        return Ok(None);
    };

    let value = match option.kind {
        ValueKind::Switch => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Value::Switch(true),
            "" | "0" | "false" | "no" | "off" => return Ok(None),
            _ => {
                return Err(ParseError::InvalidEnvironment {
                    var: var.to_string(),
                    value: raw.clone(),
                });
            }
        },
        ValueKind::String => Value::String(raw.clone()),
        ValueKind::StringList => Value::StringList(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        ),
    };
    Ok(Some(value))
}
