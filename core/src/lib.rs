//! Core option-schema types and parsed option values.
//!
//! This crate defines the program-independent half of a startup option
//! pipeline:
//!
//! - [`OptionSchema`]: ordered declarations of named options
//!   ([`OptionDescriptor`]) and positional slots ([`PositionalDescriptor`]).
//! - [`SchemaError`]: registration failures such as duplicate names or a
//!   positional declared after an unbounded one.
//! - [`ParsedEnvironment`]: the flat `name → value` mapping a parsing engine
//!   produces, with [`ValidationError`] for values that do not fit the schema.
//! - [`OptionSchema::help_listing`]: the two-column option listing used in
//!   help output.
//!
//! # Example
//!
//! ```
//! use dbshell_options_core::*;
//!
//! let mut schema = OptionSchema::new("options");
//! schema
//!     .add_option(OptionDescriptor::string("username", "username for authentication").with_short('u'))
//!     .unwrap();
//! schema.add_option(OptionDescriptor::string("dbaddress", "dbaddress").hidden()).unwrap();
//! schema
//!     .add_positional(PositionalDescriptor::new("dbaddress", Arity::Exactly(1)))
//!     .unwrap();
//!
//! let mut env = ParsedEnvironment::new();
//! env.insert("dbaddress", Value::from("localhost/test"), Source::CommandLine);
//! assert!(env.validate(&schema).is_ok());
//! assert!(schema.help_listing().contains("-u [ --username ] arg"));
//! ```

mod environment;
mod help;
mod types;
mod validate;

pub use environment::{Entry, ParsedEnvironment, Source, ValidationError};
pub use help::DESCRIPTION_COLUMN;
pub use types::*;
pub use validate::{SchemaError, validate_schema};
