//! Deciding whether the leading positional token is a server address or a
//! script file.
//!
//! A db address has no required format (`foo`, `host/db` and
//! `host:port/db` are all valid) while scripts conventionally end in `.js`,
//! so the decision leans on the extension and on what exists on disk:
//!
//! - with `--nodb` every positional is a script;
//! - otherwise the token is an address when the part after the last `/` or
//!   `\` contains no `.`, or when it does not end in `.js` and does not name
//!   an existing file;
//! - anything else is a script.

use std::path::Path;

use thiserror::Error;

/// Address that can never be connected to.
pub const INVALID_ADDRESS: &str = "*";

/// Filesystem existence check.
pub trait FileProbe {
    /// Returns `true` when something exists at `path`.
    fn exists(&self, path: &str) -> bool;
}

/// [`FileProbe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }
}

impl<F> FileProbe for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, path: &str) -> bool {
        self(path)
    }
}

/// Classification of a positional token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Positional {
    /// Server address to connect to.
    Address(String),
    /// Script file to run.
    Script(String),
}

/// The resolved address was [`INVALID_ADDRESS`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{0}\" is an invalid db address")]
pub struct InvalidAddress(pub String);

/// Classifies `token` as an address or a script.
pub fn classify<P>(token: &str, nodb: bool, probe: &P) -> Positional
where
    P: FileProbe + ?Sized,
{
    if nodb || !is_address(token, probe) {
        Positional::Script(token.to_string())
    } else {
        Positional::Address(token.to_string())
    }
}

fn is_address<P>(token: &str, probe: &P) -> bool
where
    P: FileProbe + ?Sized,
{
    let name = basename(token);
    !name.contains('.') || (!name.ends_with(".js") && !probe.exists(token))
}

fn basename(token: &str) -> &str {
    token.rsplit(['/', '\\']).next().unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nothing(_: &str) -> bool {
        false
    }

    fn everything(_: &str) -> bool {
        true
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("a/b/c.js"), "c.js");
        assert_eq!(basename(r"dir\sub\x.js"), "x.js");
        assert_eq!(basename("host/"), "");
        assert_eq!(basename("plain"), "plain");
    }

    #[test]
    fn test_no_dot_in_basename_is_address() {
        for token in ["myhost", "foo", "192.168.0.5/foo", "192.168.0.5:9999/foo", "dir.d/db"] {
            assert_eq!(
                classify(token, false, &everything),
                Positional::Address(token.to_string()),
                "{token}"
            );
        }
    }

    #[test]
    fn test_js_extension_is_script_regardless_of_disk() {
        for token in ["init.js", "scripts/init.js", r"C:\tmp\x.js"] {
            assert_eq!(
                classify(token, false, &nothing),
                Positional::Script(token.to_string()),
                "{token}"
            );
        }
    }

    #[test]
    fn test_dotted_name_uses_existence() {
        assert_eq!(
            classify("foo.bar", false, &nothing),
            Positional::Address("foo.bar".to_string())
        );
        assert_eq!(
            classify("foo.bar", false, &everything),
            Positional::Script("foo.bar".to_string())
        );

        let only_foo = |path: &str| path == "foo.bar";
        assert_eq!(
            classify("other.bar", false, &only_foo),
            Positional::Address("other.bar".to_string())
        );
    }

    #[test]
    fn test_nodb_makes_everything_a_script() {
        for token in ["myhost", "192.168.0.5:9999/foo", "*", "foo.bar"] {
            assert_eq!(
                classify(token, true, &nothing),
                Positional::Script(token.to_string())
            );
        }
    }

    #[test]
    fn test_fs_probe() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.data");
        std::fs::write(&path, "db.x.insert({})").unwrap();
        let token = path.to_str().unwrap();

        assert!(FsProbe.exists(token));
        assert_eq!(
            classify(token, false, &FsProbe),
            Positional::Script(token.to_string())
        );

        let missing = dir.path().join("missing.data");
        let missing = missing.to_str().unwrap();
        assert_eq!(
            classify(missing, false, &FsProbe),
            Positional::Address(missing.to_string())
        );
    }
}
