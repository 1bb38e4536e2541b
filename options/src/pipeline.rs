//! The startup pipeline: schema → parse → pre-validate → validate →
//! materialize.
//!
//! Nothing here terminates the process. Help, version, parse failures and
//! the invalid address come back as an [`Outcome`] for the caller to act on.

use std::collections::BTreeMap;

use dbshell_options_core::{SchemaError, ValidationError};
use thiserror::Error;
use tracing::{debug, info};

use crate::address::FileProbe;
use crate::config::ShellConfig;
use crate::help::help_text;
use crate::materialize::materialize;
use crate::parser::{parse, program_name};
use crate::prevalidate::{Gate, RuntimeSettings, pre_validate};
use crate::schema::build_schema;

/// Exit status for `--help`, `--version` and normal startup.
pub const EXIT_CLEAN: i32 = 0;
/// Exit status for schema and validation failures.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status for malformed command lines and the invalid address.
pub const EXIT_BAD_OPTIONS: i32 = 2;

/// Failures the pipeline hands back instead of a terminal outcome.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The option schema could not be registered.
    #[error("failed to register options: {0}")]
    Schema(#[from] SchemaError),
    /// Parsed values failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StartupError {
    /// Exit status the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}

/// Everything the shell needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Startup {
    pub config: ShellConfig,
    pub settings: RuntimeSettings,
}

/// How the pipeline ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Start the shell.
    Continue(Startup),
    /// Print the message to stdout and exit cleanly.
    ExitClean(String),
    /// Print the message to stderr and exit with bad options.
    ExitError(String),
}

impl Outcome {
    /// Exit status matching this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Continue(_) | Outcome::ExitClean(_) => EXIT_CLEAN,
            Outcome::ExitError(_) => EXIT_BAD_OPTIONS,
        }
    }
}

/// Runs the whole pipeline over `args` (including `argv[0]`) and `env_vars`.
///
/// # Errors
///
/// Returns [`StartupError`] when the schema cannot be built or parsed values
/// fail validation. Every other way out is an [`Outcome`].
pub fn run<P>(
    args: &[String],
    env_vars: &BTreeMap<String, String>,
    probe: &P,
) -> Result<Outcome, StartupError>
where
    P: FileProbe + ?Sized,
{
    run_with(args, env_vars, probe, |_| {})
}

/// Like [`run`], calling `on_settings` as soon as the pre-validation gate
/// has produced the [`RuntimeSettings`].
///
/// Everything the pipeline logs after the gate goes through the subscriber
/// as `on_settings` left it, so a caller can apply `--quiet`/`--verbose`
/// there.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with<P, F>(
    args: &[String],
    env_vars: &BTreeMap<String, String>,
    probe: &P,
    on_settings: F,
) -> Result<Outcome, StartupError>
where
    P: FileProbe + ?Sized,
    F: FnOnce(&RuntimeSettings),
{
    let schema = build_schema()?;
    let program = program_name(args);

    let env = match parse(&schema, args, env_vars) {
        Ok(env) => env,
        Err(err) => {
            debug!(%err, "command line rejected");
            return Ok(Outcome::ExitError(format!(
                "{err}\ntry '{program} --help' for more information"
            )));
        }
    };

    let settings = match pre_validate(&env, args, &schema)? {
        Gate::Help(text) | Gate::Version(text) => return Ok(Outcome::ExitClean(text)),
        Gate::Proceed(settings) => settings,
    };
    on_settings(&settings);
    debug!(values = env.len(), "parsed startup options");

    env.validate(&schema)?;

    match materialize(&env, probe) {
        Ok(config) => {
            if config.nodb {
                info!(files = config.files.len(), "starting without a database connection");
            } else {
                debug!(url = %config.url, files = config.files.len(), "startup options resolved");
            }
            Ok(Outcome::Continue(Startup { config, settings }))
        }
        Err(err) => Ok(Outcome::ExitError(format!(
            "ERROR: {err}\n{}",
            help_text(program, &schema)
        ))),
    }
}
