//! Schema registration checks.
//!
//! Every [`OptionSchema::add_option`] and [`OptionSchema::add_positional`]
//! call runs the checks in this module against the schema built so far.
//! [`validate_schema`] replays them over a whole schema, which is how
//! schemas that were deserialized rather than built get checked.
//!
//! # Examples
//!
//! ```
//! use dbshell_options_core::*;
//!
//! let mut schema = OptionSchema::new("options");
//! schema.add_option(OptionDescriptor::string_list("files", "")).unwrap();
//! schema.add_positional(PositionalDescriptor::new("files", Arity::Unbounded)).unwrap();
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Nothing may follow an unbounded positional.
//! schema.add_option(OptionDescriptor::string("dbaddress", "")).unwrap();
//! let err = schema
//!     .add_positional(PositionalDescriptor::new("dbaddress", Arity::Exactly(1)))
//!     .unwrap_err();
//! assert_eq!(err, SchemaError::AfterUnbounded("dbaddress".into()));
//! ```

use thiserror::Error;

use crate::{Arity, OptionDescriptor, OptionSchema, PositionalDescriptor, Value, ValueKind};

/// Errors raised while registering options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Option name is empty or whitespace-only.
    #[error("option name cannot be empty")]
    EmptyName,
    /// Two options share a name.
    #[error("duplicate option: {0}")]
    DuplicateOption(String),
    /// Two options share a long spelling.
    #[error("duplicate long flag: --{0}")]
    DuplicateLong(String),
    /// Two options share a short spelling.
    #[error("duplicate short flag: -{0}")]
    DuplicateShort(char),
    /// Long spelling is empty, starts with a dash, or contains whitespace.
    #[error("invalid long flag format: {0:?}")]
    InvalidLong(String),
    /// Short spelling is not an ASCII letter or digit.
    #[error("invalid short flag: {0:?}")]
    InvalidShort(char),
    /// A default or implicit value does not match the option kind.
    #[error("{what} value for {name} does not match option kind {kind:?}")]
    ValueKindMismatch {
        /// Option name.
        name: String,
        /// `"default"` or `"implicit"`.
        what: &'static str,
        /// Declared kind.
        kind: ValueKind,
    },
    /// A positional slot names an option that was never declared.
    #[error("positional refers to undeclared option: {0}")]
    UnknownPositional(String),
    /// The same option is declared positional twice.
    #[error("duplicate positional: {0}")]
    DuplicatePositional(String),
    /// A positional slot accepts no tokens.
    #[error("positional arity must be at least 1: {0}")]
    ZeroArity(String),
    /// A positional slot follows an unbounded one.
    #[error("positional {0} follows an unbounded positional")]
    AfterUnbounded(String),
    /// The arity of a slot cannot be stored in the option's kind.
    #[error("positional {name} with arity {arity:?} cannot fill a {kind:?} option")]
    ArityKindMismatch {
        /// Option name.
        name: String,
        /// Declared arity.
        arity: Arity,
        /// Kind of the option it fills.
        kind: ValueKind,
    },
}

/// Replays registration checks over a complete schema.
///
/// Returns every failing declaration in order; an empty vector means the
/// schema is valid.
pub fn validate_schema(schema: &OptionSchema) -> Vec<SchemaError> {
    let mut rebuilt = OptionSchema::new(&schema.title);
    let mut errors = Vec::new();

    for option in schema.options() {
        if let Err(err) = rebuilt.add_option(option.clone()) {
            errors.push(err);
        }
    }
    for positional in schema.positionals() {
        if let Err(err) = rebuilt.add_positional(positional.clone()) {
            errors.push(err);
        }
    }

    errors
}

pub(crate) fn check_option(
    schema: &OptionSchema,
    option: &OptionDescriptor,
) -> Result<(), SchemaError> {
    if option.name.trim().is_empty() {
        return Err(SchemaError::EmptyName);
    }
    if schema.find(&option.name).is_some() {
        return Err(SchemaError::DuplicateOption(option.name.clone()));
    }

    let long = option.long.as_str();
    if long.is_empty() || long.starts_with('-') || long.chars().any(char::is_whitespace) {
        return Err(SchemaError::InvalidLong(long.to_string()));
    }
    if schema.options().iter().any(|o| o.long == long) {
        return Err(SchemaError::DuplicateLong(long.to_string()));
    }

    if let Some(short) = option.short {
        if !short.is_ascii_alphanumeric() {
            return Err(SchemaError::InvalidShort(short));
        }
        if schema.options().iter().any(|o| o.short == Some(short)) {
            return Err(SchemaError::DuplicateShort(short));
        }
    }

    check_value_kind(option, option.default_value.as_ref(), "default")?;
    check_value_kind(option, option.implicit_value.as_ref(), "implicit")
}

fn check_value_kind(
    option: &OptionDescriptor,
    value: Option<&Value>,
    what: &'static str,
) -> Result<(), SchemaError> {
    match value {
        Some(value) if value.kind() != option.kind => Err(SchemaError::ValueKindMismatch {
            name: option.name.clone(),
            what,
            kind: option.kind,
        }),
        _ => Ok(()),
    }
}

pub(crate) fn check_positional(
    schema: &OptionSchema,
    positional: &PositionalDescriptor,
) -> Result<(), SchemaError> {
    let name = positional.name.as_str();
    let Some(option) = schema.find(name) else {
        return Err(SchemaError::UnknownPositional(name.to_string()));
    };
    if schema.find_positional(name).is_some() {
        return Err(SchemaError::DuplicatePositional(name.to_string()));
    }
    if positional.arity == Arity::Exactly(0) {
        return Err(SchemaError::ZeroArity(name.to_string()));
    }
    if schema
        .positionals()
        .last()
        .is_some_and(|last| last.arity == Arity::Unbounded)
    {
        return Err(SchemaError::AfterUnbounded(name.to_string()));
    }

    let expected = match positional.arity {
        Arity::Exactly(1) => ValueKind::String,
        _ => ValueKind::StringList,
    };
    if option.kind != expected {
        return Err(SchemaError::ArityKindMismatch {
            name: name.to_string(),
            arity: positional.arity,
            kind: option.kind,
        });
    }

    Ok(())
}
