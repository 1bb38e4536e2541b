//! Resolved shell configuration.

use serde::Serialize;

/// Placeholder written over a non-empty password by [`ShellConfig::redacted`].
pub const REDACTED: &str = "<redacted>";

/// Startup configuration consumed by the rest of the shell.
///
/// Produced once by [`materialize`](crate::materialize) and read-only
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShellConfig {
    /// Server address resolved from the positional token; empty when none.
    pub url: String,
    /// `--host`
    pub host: Option<String>,
    /// `--port`
    pub port: Option<String>,
    /// Inline script from `--eval`.
    pub script: Option<String>,
    pub username: Option<String>,
    pub password: String,
    /// `true` whenever `--password` was given, even with an empty value.
    pub using_password: bool,
    pub authentication_database: String,
    pub authentication_mechanism: String,
    /// Enter the interactive shell once scripts have run.
    pub run_shell: bool,
    pub nodb: bool,
    pub norc: bool,
    pub auto_kill_op: bool,
    pub no_kill_op: bool,
    /// Script files in execution order.
    pub files: Vec<String>,
}

impl ShellConfig {
    /// Returns a copy safe to print, with any password replaced.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.password.is_empty() {
            copy.password = REDACTED.to_string();
        }
        copy
    }
}
