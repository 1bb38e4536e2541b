//! Startup option pipeline for the `dbshell` database shell.
//!
//! The pipeline runs in fixed order, each stage a function of the previous
//! stage's output:
//!
//! 1. [`build_schema`] declares every accepted option and positional slot.
//! 2. [`parse`] matches argv and environment variables against the schema.
//! 3. [`pre_validate`] answers `--help`/`--version` and collects process-wide
//!    settings such as quiet mode, IPv6 and log verbosity.
//! 4. [`ParsedEnvironment::validate`](dbshell_options_core::ParsedEnvironment::validate)
//!    checks the parsed values.
//! 5. [`materialize`] fills a [`ShellConfig`], resolving the leading
//!    positional token into a server address or a script file
//!    ([`classify`]).
//!
//! [`run`] composes all of it and returns an [`Outcome`]; only the binary
//! exits the process. [`run_with`] also hands the gate's settings to the
//! caller before anything is materialized.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use dbshell_options::{Outcome, run};
//!
//! let args: Vec<String> = ["dbshell", "--nodb", "a.js", "b.js"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let no_files = |_: &str| false;
//!
//! match run(&args, &BTreeMap::new(), &no_files).unwrap() {
//!     Outcome::Continue(startup) => {
//!         assert!(startup.config.nodb);
//!         assert_eq!(startup.config.url, "");
//!         assert_eq!(startup.config.files, vec!["a.js", "b.js"]);
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

pub mod address;
pub mod config;
pub mod help;
pub mod materialize;
pub mod parser;
pub mod pipeline;
pub mod prevalidate;
pub mod schema;
pub mod ssl;

pub use address::{FileProbe, FsProbe, INVALID_ADDRESS, InvalidAddress, Positional, classify};
pub use config::ShellConfig;
pub use help::{VERSION, help_text, version_text};
pub use materialize::materialize;
pub use parser::{ParseError, parse};
pub use pipeline::{
    EXIT_BAD_OPTIONS, EXIT_CLEAN, EXIT_FAILURE, Outcome, Startup, StartupError, run, run_with,
};
pub use prevalidate::{Gate, RuntimeSettings, pre_validate};
pub use schema::build_schema;
pub use ssl::SslParams;
