//! SSL client options.

use dbshell_options_core::{
    OptionDescriptor, OptionSchema, ParsedEnvironment, SchemaError, ValidationError,
};
use serde::Serialize;

/// Options that only make sense together with `--ssl`.
const SSL_DEPENDENT: [&str; 6] = [
    "sslCAFile",
    "sslPEMKeyFile",
    "sslPEMKeyPassword",
    "sslCRLFile",
    "sslAllowInvalidCertificates",
    "sslFIPSMode",
];

/// Stored SSL client settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SslParams {
    pub enabled: bool,
    pub ca_file: Option<String>,
    pub pem_key_file: Option<String>,
    #[serde(skip_serializing)]
    pub pem_key_password: Option<String>,
    pub crl_file: Option<String>,
    pub allow_invalid_certificates: bool,
    pub fips_mode: bool,
}

/// Registers the SSL client options.
///
/// # Errors
///
/// Returns the first declaration `options` refuses to register.
pub fn add_ssl_client_options(options: &mut OptionSchema) -> Result<(), SchemaError> {
    type OD = OptionDescriptor;

    options.add_option(OD::switch("ssl", "use SSL for all connections"))?;
    options.add_option(OD::string(
        "sslCAFile",
        "Certificate Authority file for SSL",
    ))?;
    options.add_option(OD::string(
        "sslPEMKeyFile",
        "PEM certificate/key file for SSL",
    ))?;
    options.add_option(
        OD::string("sslPEMKeyPassword", "password for key in PEM file for SSL").with_implicit(""),
    )?;
    options.add_option(OD::string(
        "sslCRLFile",
        "Certificate Revocation List file for SSL",
    ))?;
    options.add_option(OD::switch(
        "sslAllowInvalidCertificates",
        "allow connections to servers with invalid certificates",
    ))?;
    options.add_option(OD::switch(
        "sslFIPSMode",
        "activate FIPS 140-2 mode at startup",
    ))?;
    Ok(())
}

/// Copies the SSL options out of `env`.
///
/// # Errors
///
/// Any SSL option without `--ssl`, or a PEM key password without a PEM key
/// file, is a [`ValidationError::Requires`].
pub fn store_ssl_client_options(env: &ParsedEnvironment) -> Result<SslParams, ValidationError> {
    if !env.count("ssl") {
        if let Some(option) = SSL_DEPENDENT.iter().find(|name| env.count(name)) {
            return Err(ValidationError::Requires {
                option: option.to_string(),
                requires: "ssl".to_string(),
            });
        }
        return Ok(SslParams::default());
    }

    if env.count("sslPEMKeyPassword") && !env.count("sslPEMKeyFile") {
        return Err(ValidationError::Requires {
            option: "sslPEMKeyPassword".to_string(),
            requires: "sslPEMKeyFile".to_string(),
        });
    }

    let owned = |name: &str| env.get_str(name).map(str::to_string);
    Ok(SslParams {
        enabled: true,
        ca_file: owned("sslCAFile"),
        pem_key_file: owned("sslPEMKeyFile"),
        pem_key_password: owned("sslPEMKeyPassword"),
        crl_file: owned("sslCRLFile"),
        allow_invalid_certificates: env.count("sslAllowInvalidCertificates"),
        fips_mode: env.count("sslFIPSMode"),
    })
}

#[cfg(test)]
mod tests {
    use dbshell_options_core::{Source, Value};

    use super::*;

    fn env(values: &[(&str, Value)]) -> ParsedEnvironment {
        let mut env = ParsedEnvironment::new();
        for (name, value) in values {
            env.insert(name, value.clone(), Source::CommandLine);
        }
        env
    }

    #[test]
    fn test_no_ssl_options_stores_defaults() {
        assert_eq!(
            store_ssl_client_options(&ParsedEnvironment::new()),
            Ok(SslParams::default())
        );
    }

    #[test]
    fn test_ssl_options_require_ssl() {
        let env = env(&[("sslCAFile", Value::from("ca.pem"))]);
        assert_eq!(
            store_ssl_client_options(&env),
            Err(ValidationError::Requires {
                option: "sslCAFile".to_string(),
                requires: "ssl".to_string(),
            })
        );
    }

    #[test]
    fn test_pem_password_requires_key_file() {
        let env = env(&[
            ("ssl", Value::Switch(true)),
            ("sslPEMKeyPassword", Value::from("")),
        ]);
        assert!(matches!(
            store_ssl_client_options(&env),
            Err(ValidationError::Requires { requires, .. }) if requires == "sslPEMKeyFile"
        ));
    }

    #[test]
    fn test_stores_all_ssl_values() {
        let env = env(&[
            ("ssl", Value::Switch(true)),
            ("sslPEMKeyFile", Value::from("client.pem")),
            ("sslPEMKeyPassword", Value::from("secret")),
            ("sslCAFile", Value::from("ca.pem")),
            ("sslAllowInvalidCertificates", Value::Switch(true)),
        ]);
        let params = store_ssl_client_options(&env).unwrap();

        assert!(params.enabled);
        assert_eq!(params.pem_key_file.as_deref(), Some("client.pem"));
        assert_eq!(params.pem_key_password.as_deref(), Some("secret"));
        assert_eq!(params.ca_file.as_deref(), Some("ca.pem"));
        assert_eq!(params.crl_file, None);
        assert!(params.allow_invalid_certificates);
        assert!(!params.fips_mode);
    }
}
