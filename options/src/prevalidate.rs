//! Checks that run before full validation.
//!
//! `--help` and `--version` end the pipeline here. Otherwise the switches
//! that change process-wide behavior (quiet mode, IPv6, log verbosity) and
//! the SSL client options are collected into [`RuntimeSettings`].

use dbshell_options_core::{OptionSchema, ParsedEnvironment, ValidationError};
use serde::Serialize;
use tracing::level_filters::LevelFilter;

use crate::help::{help_text, version_text};
use crate::parser::program_name;
use crate::ssl::{SslParams, store_ssl_client_options};

/// Process-wide settings chosen on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeSettings {
    pub quiet: bool,
    pub ipv6: bool,
    /// Levels above the default log level.
    pub verbosity: u8,
    pub ssl: SslParams,
}

impl RuntimeSettings {
    /// Maximum log level for these settings.
    pub fn max_level(&self) -> LevelFilter {
        match (self.verbosity, self.quiet) {
            (0, true) => LevelFilter::WARN,
            (0, false) => LevelFilter::INFO,
            (1, _) => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Result of the pre-validation gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// `--help` was given; carries the usage text.
    Help(String),
    /// `--version` was given; carries the version banner.
    Version(String),
    /// Continue with these settings.
    Proceed(RuntimeSettings),
}

/// Runs the pre-validation gate.
///
/// # Errors
///
/// Propagates SSL option failures unchanged.
pub fn pre_validate(
    env: &ParsedEnvironment,
    args: &[String],
    schema: &OptionSchema,
) -> Result<Gate, ValidationError> {
    if env.count("help") {
        return Ok(Gate::Help(help_text(program_name(args), schema)));
    }
    if env.count("version") {
        return Ok(Gate::Version(version_text()));
    }

    let mut settings = RuntimeSettings::default();
    if env.count("quiet") {
        settings.quiet = true;
    }
    settings.ssl = store_ssl_client_options(env)?;
    if env.count("ipv6") {
        settings.ipv6 = true;
    }
    if env.count("verbose") {
        settings.verbosity += 1;
    }

    Ok(Gate::Proceed(settings))
}

#[cfg(test)]
mod tests {
    use dbshell_options_core::{Source, Value};

    use super::*;
    use crate::schema::build_schema;

    fn switches(names: &[&str]) -> ParsedEnvironment {
        let mut env = ParsedEnvironment::new();
        for name in names {
            env.insert(name, Value::Switch(true), Source::CommandLine);
        }
        env
    }

    fn args() -> Vec<String> {
        vec!["dbshell".to_string()]
    }

    #[test]
    fn test_help_wins_over_version() {
        let schema = build_schema().unwrap();
        let gate = pre_validate(&switches(&["help", "version"]), &args(), &schema).unwrap();
        match gate {
            Gate::Help(text) => assert!(text.contains("usage: dbshell")),
            other => panic!("expected help, got {other:?}"),
        }
    }

    #[test]
    fn test_version_banner() {
        let schema = build_schema().unwrap();
        let gate = pre_validate(&switches(&["version"]), &args(), &schema).unwrap();
        assert_eq!(gate, Gate::Version(version_text()));
    }

    #[test]
    fn test_collects_runtime_switches() {
        let schema = build_schema().unwrap();
        let gate = pre_validate(&switches(&["quiet", "ipv6", "verbose"]), &args(), &schema).unwrap();
        let Gate::Proceed(settings) = gate else {
            panic!("expected proceed");
        };

        assert!(settings.quiet);
        assert!(settings.ipv6);
        assert_eq!(settings.verbosity, 1);
        assert_eq!(settings.max_level(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_ssl_failure_is_propagated() {
        let schema = build_schema().unwrap();
        let err = pre_validate(&switches(&["sslFIPSMode"]), &args(), &schema).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Requires {
                option: "sslFIPSMode".to_string(),
                requires: "ssl".to_string(),
            }
        );
    }

    #[test]
    fn test_log_levels() {
        let quiet = RuntimeSettings {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(quiet.max_level(), LevelFilter::WARN);
        assert_eq!(RuntimeSettings::default().max_level(), LevelFilter::INFO);
    }
}
