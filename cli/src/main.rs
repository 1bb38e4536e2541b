use std::collections::BTreeMap;
use std::io::{self, Write};
use std::process;

use dbshell_options::{
    EXIT_FAILURE, FsProbe, Outcome, RuntimeSettings, ShellConfig, Startup, run_with,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Printed on stdout once startup options are resolved.
#[derive(Debug, Serialize)]
struct Report<'a> {
    config: ShellConfig,
    settings: &'a RuntimeSettings,
}

fn main() {
    let filter = init_logging();
    let args: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let env_vars = process_environment();

    let outcome = match run_with(&args, &env_vars, &FsProbe, |settings| {
        apply_log_level(filter.as_ref(), settings)
    }) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(err.exit_code());
        }
    };

    let code = outcome.exit_code();
    match outcome {
        Outcome::ExitClean(text) => print_stdout(&text),
        Outcome::ExitError(text) => eprintln!("{text}"),
        Outcome::Continue(startup) => {
            if let Err(err) = report(&startup) {
                eprintln!("error: failed to serialize startup configuration: {err}");
                process::exit(EXIT_FAILURE);
            }
        }
    }

    process::exit(code);
}

/// Installs the stderr subscriber. `RUST_LOG`, when set, is final;
/// otherwise the returned handle lets `--quiet`/`--verbose` adjust the level.
fn init_logging() -> Option<FilterHandle> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();
        return None;
    }

    let (filter, handle) = reload::Layer::new(EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
    Some(handle)
}

fn apply_log_level(handle: Option<&FilterHandle>, settings: &RuntimeSettings) {
    let Some(handle) = handle else {
        return;
    };
    let filter = EnvFilter::default().add_directive(settings.max_level().into());
    if let Err(err) = handle.reload(filter) {
        eprintln!("error: failed to adjust log level: {err}");
    }
}

fn process_environment() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

fn report(startup: &Startup) -> serde_json::Result<()> {
    let config = &startup.config;
    if !config.url.is_empty() {
        info!(url = %config.url, "db address");
    }
    if !config.files.is_empty() {
        info!(files = ?config.files, run_shell = config.run_shell, "scripts queued");
    }

    let report = Report {
        config: config.redacted(),
        settings: &startup.settings,
    };
    print_stdout(&serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Writes `text` and a newline to stdout. A closed pipe is not an error.
fn print_stdout(text: &str) {
    let mut stdout = io::stdout().lock();
    if let Err(err) = writeln!(stdout, "{text}").and_then(|()| stdout.flush()) {
        if err.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("error: failed to write output: {err}");
            process::exit(EXIT_FAILURE);
        }
    }
}
