//! Copying validated option values into a [`ShellConfig`].

use dbshell_options_core::ParsedEnvironment;
use tracing::debug;

use crate::address::{FileProbe, INVALID_ADDRESS, InvalidAddress, Positional, classify};
use crate::config::ShellConfig;

/// Populates a [`ShellConfig`] from a validated environment.
///
/// The `dbaddress` token is classified with [`classify`]; a script result is
/// put in front of any `files` already given. `run_shell` is set by
/// `--shell` and also whenever there is nothing else to run.
///
/// # Errors
///
/// Returns [`InvalidAddress`] when the resolved address is `"*"`.
pub fn materialize<P>(env: &ParsedEnvironment, probe: &P) -> Result<ShellConfig, InvalidAddress>
where
    P: FileProbe + ?Sized,
{
    let owned = |name: &str| env.get_str(name).map(str::to_string);

    let mut config = ShellConfig {
        port: owned("port"),
        host: owned("host"),
        script: owned("eval"),
        username: owned("username"),
        nodb: env.count("nodb"),
        norc: env.count("norc"),
        no_kill_op: env.count("nokillop"),
        auto_kill_op: env.count("autokillop"),
        ..Default::default()
    };

    if env.count("password") {
        config.using_password = true;
        config.password = owned("password").unwrap_or_default();
    }
    if let Some(database) = owned("authenticationDatabase") {
        config.authentication_database = database;
    }
    if let Some(mechanism) = owned("authenticationMechanism") {
        config.authentication_mechanism = mechanism;
    }
    if let Some(files) = env.get_list("files") {
        config.files = files.to_vec();
    }

    if let Some(token) = env.get_str("dbaddress") {
        match classify(token, config.nodb, probe) {
            Positional::Address(url) => {
                debug!(%url, "positional resolved to db address");
                config.url = url;
            }
            Positional::Script(path) => {
                debug!(%path, "positional resolved to script file");
                config.files.insert(0, path);
            }
        }
    }

    if config.url == INVALID_ADDRESS {
        return Err(InvalidAddress(config.url));
    }

    config.run_shell =
        env.count("shell") || (config.files.is_empty() && config.script.is_none());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use dbshell_options_core::{Source, Value};

    use super::*;

    fn nothing(_: &str) -> bool {
        false
    }

    fn env(values: &[(&str, Value)]) -> ParsedEnvironment {
        let mut env = ParsedEnvironment::new();
        for (name, value) in values {
            env.insert(name, value.clone(), Source::CommandLine);
        }
        env
    }

    fn files(items: &[&str]) -> Value {
        Value::from(items.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_copies_present_values() {
        let env = env(&[
            ("host", Value::from("db.example.net")),
            ("port", Value::from("27018")),
            ("eval", Value::from("printjson(db.stats())")),
            ("username", Value::from("admin")),
            ("authenticationDatabase", Value::from("admin")),
            ("authenticationMechanism", Value::from("PLAIN")),
            ("norc", Value::Switch(true)),
            ("nokillop", Value::Switch(true)),
            ("autokillop", Value::Switch(true)),
        ]);
        let config = materialize(&env, &nothing).unwrap();

        assert_eq!(config.host.as_deref(), Some("db.example.net"));
        assert_eq!(config.port.as_deref(), Some("27018"));
        assert_eq!(config.script.as_deref(), Some("printjson(db.stats())"));
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.authentication_database, "admin");
        assert_eq!(config.authentication_mechanism, "PLAIN");
        assert!(config.norc && config.no_kill_op && config.auto_kill_op);
        assert!(!config.nodb);
        assert!(!config.run_shell);
        assert!(!config.using_password);
    }

    #[test]
    fn test_empty_password_still_counts() {
        let config = materialize(&env(&[("password", Value::from(""))]), &nothing).unwrap();
        assert!(config.using_password);
        assert_eq!(config.password, "");

        let config = materialize(&ParsedEnvironment::new(), &nothing).unwrap();
        assert!(!config.using_password);
    }

    #[test]
    fn test_script_token_goes_in_front_of_files() {
        let env = env(&[
            ("dbaddress", Value::from("first.js")),
            ("files", files(&["second.js", "third.js"])),
        ]);
        let config = materialize(&env, &nothing).unwrap();

        assert_eq!(config.url, "");
        assert_eq!(config.files, vec!["first.js", "second.js", "third.js"]);
    }

    #[test]
    fn test_address_token_keeps_files() {
        let env = env(&[
            ("dbaddress", Value::from("192.168.0.5:9999/foo")),
            ("files", files(&["script.js"])),
        ]);
        let config = materialize(&env, &nothing).unwrap();

        assert_eq!(config.url, "192.168.0.5:9999/foo");
        assert_eq!(config.files, vec!["script.js"]);
    }

    #[test]
    fn test_nodb_turns_address_into_file() {
        let env = env(&[
            ("nodb", Value::Switch(true)),
            ("dbaddress", Value::from("myhost")),
        ]);
        let config = materialize(&env, &nothing).unwrap();

        assert_eq!(config.url, "");
        assert_eq!(config.files, vec!["myhost"]);
    }

    #[test]
    fn test_star_address_is_rejected() {
        let err = materialize(&env(&[("dbaddress", Value::from("*"))]), &nothing).unwrap_err();
        assert_eq!(err, InvalidAddress("*".to_string()));
        assert_eq!(err.to_string(), "\"*\" is an invalid db address");

        let env = env(&[
            ("dbaddress", Value::from("*")),
            ("nodb", Value::Switch(true)),
        ]);
        assert_eq!(materialize(&env, &nothing).unwrap().files, vec!["*"]);
    }

    #[test]
    fn test_run_shell_defaults_when_nothing_to_run() {
        let config = materialize(&ParsedEnvironment::new(), &nothing).unwrap();
        assert!(config.run_shell);

        let with_file = env(&[("files", files(&["a.js"]))]);
        assert!(!materialize(&with_file, &nothing).unwrap().run_shell);

        let forced = env(&[
            ("files", files(&["a.js"])),
            ("shell", Value::Switch(true)),
        ]);
        assert!(materialize(&forced, &nothing).unwrap().run_shell);
    }

    #[test]
    fn test_materialize_is_idempotent() {
        let env = env(&[
            ("dbaddress", Value::from("foo.bar")),
            ("files", files(&["a.js"])),
            ("password", Value::from("pw")),
        ]);
        let first = materialize(&env, &nothing).unwrap();
        let second = materialize(&env, &nothing).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
