//! The dbshell option schema.

use dbshell_options_core::{
    Arity, OptionDescriptor, OptionSchema, PositionalDescriptor, SchemaError,
};

use crate::ssl::add_ssl_client_options;

/// Authentication mechanism used when none is given.
pub const DEFAULT_AUTH_MECHANISM: &str = "MONGODB-CR";

/// Builds the complete dbshell option schema.
///
/// # Errors
///
/// Returns the first declaration the schema refuses to register.
pub fn build_schema() -> Result<OptionSchema, SchemaError> {
    let mut options = OptionSchema::new("options");
    add_shell_options(&mut options)?;
    Ok(options)
}

/// Registers the shell's options, SSL client options and positional slots.
///
/// # Errors
///
/// Returns the first declaration `options` refuses to register.
pub fn add_shell_options(options: &mut OptionSchema) -> Result<(), SchemaError> {
    type OD = OptionDescriptor;

    options.add_option(OD::switch("shell", "run the shell after executing files"))?;
    options.add_option(OD::switch(
        "nodb",
        "don't connect to a server on startup - no 'db address' arg expected",
    ))?;
    options.add_option(OD::switch(
        "norc",
        "will not run the \".dbshellrc.js\" file on start up",
    ))?;
    options.add_option(OD::switch("quiet", "be less chatty"))?;
    options.add_option(OD::string("port", "port to connect to"))?;
    options.add_option(OD::string("host", "server to connect to"))?;
    options.add_option(OD::string("eval", "evaluate javascript"))?;
    options.add_option(OD::string("username", "username for authentication").with_short('u'))?;
    options.add_option(
        OD::string("password", "password for authentication")
            .with_short('p')
            .with_implicit(""),
    )?;
    options.add_option(
        OD::string("authenticationDatabase", "user source (defaults to dbname)").with_default(""),
    )?;
    options.add_option(
        OD::string("authenticationMechanism", "authentication mechanism")
            .with_default(DEFAULT_AUTH_MECHANISM),
    )?;
    options.add_option(OD::switch("help", "show this usage information").with_short('h'))?;
    options.add_option(OD::switch("version", "show version information"))?;
    options.add_option(OD::switch("verbose", "increase verbosity"))?;
    options.add_option(OD::switch(
        "ipv6",
        "enable IPv6 support (disabled by default)",
    ))?;

    add_ssl_client_options(options)?;

    options.add_option(OD::string("dbaddress", "dbaddress").hidden())?;
    options.add_option(OD::string_list("files", "files").hidden())?;
    // testing only; also disabled automatically once a test starts a server program
    options.add_option(OD::switch("nokillop", "nokillop").hidden())?;
    // testing only; kills ops without prompting
    options.add_option(OD::switch("autokillop", "autokillop").hidden())?;

    options.add_positional(PositionalDescriptor::new("dbaddress", Arity::Exactly(1)))?;
    options.add_positional(PositionalDescriptor::new("files", Arity::Unbounded))?;

    Ok(())
}
