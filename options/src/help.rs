//! Usage and version text.

use dbshell_options_core::OptionSchema;

/// Version reported by `--version` and the help banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const ADDRESS_EXAMPLES: [(&str, &str); 3] = [
    ("foo", "foo database on local machine"),
    ("192.168.0.5/foo", "foo database on 192.168.0.5 machine"),
    (
        "192.168.0.5:9999/foo",
        "foo database on 192.168.0.5 machine on port 9999",
    ),
];

/// Returns the version banner.
pub fn version_text() -> String {
    format!("dbshell version: {VERSION}")
}

/// Renders the usage text for `program`.
pub fn help_text(program: &str, schema: &OptionSchema) -> String {
    let mut out = version_text();
    out.push('\n');
    out.push_str(&format!(
        "usage: {program} [options] [db address] [file names (ending in .js)]\n"
    ));
    out.push_str("db address can be:\n");
    for (address, meaning) in ADDRESS_EXAMPLES {
        out.push_str(&format!("  {address:<22}{meaning}\n"));
    }
    out.push_str(&schema.help_listing());
    out.push('\n');
    out.push_str(
        "file names: a list of files to run. files have to end in .js and will exit after \
         unless --shell is specified",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::build_schema;

    #[test]
    fn test_help_text_layout() {
        let schema = build_schema().unwrap();
        let text = help_text("dbshell", &schema);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], format!("dbshell version: {VERSION}"));
        assert_eq!(
            lines[1],
            "usage: dbshell [options] [db address] [file names (ending in .js)]"
        );
        assert_eq!(lines[2], "db address can be:");
        assert_eq!(lines[3], "  foo                   foo database on local machine");
        assert_eq!(
            lines[5],
            "  192.168.0.5:9999/foo  foo database on 192.168.0.5 machine on port 9999"
        );
        assert_eq!(lines[6], "options:");
        assert!(text.ends_with("unless --shell is specified"));
    }

    #[test]
    fn test_help_lists_public_options_only() {
        let schema = build_schema().unwrap();
        let text = help_text("dbshell", &schema);

        assert!(text.contains("  --nodb "));
        assert!(text.contains("-u [ --username ] arg"));
        assert!(text.contains("-p [ --password ] [=arg(=)]"));
        assert!(text.contains("--authenticationMechanism arg (=MONGODB-CR)"));
        assert!(text.contains("--sslPEMKeyFile arg"));
        assert!(!text.contains("nokillop"));
        assert!(!text.contains("autokillop"));
        assert!(!text.contains("dbaddress"));
    }

    #[test]
    fn test_help_text_is_deterministic() {
        let schema = build_schema().unwrap();
        assert_eq!(help_text("x", &schema), help_text("x", &schema));
        assert!(help_text("/usr/bin/dbshell", &schema).contains("usage: /usr/bin/dbshell "));
    }
}
