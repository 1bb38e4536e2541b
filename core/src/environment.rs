//! Parsed option values.
//!
//! A [`ParsedEnvironment`] is what a parsing engine hands back after
//! matching argv and environment variables against an [`OptionSchema`]:
//! a flat `name → value` mapping that remembers where each value came from.
//! Defaults are stored like any other value, so [`ParsedEnvironment::count`]
//! is true for an option whose default applied.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::{OptionSchema, Value, ValueKind};

/// Where a parsed value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    /// Given on the command line.
    CommandLine,
    /// Read from a bound environment variable.
    Environment,
    /// Filled from the schema default.
    Default,
}

/// A stored value and its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// The value.
    pub value: Value,
    /// Where it came from.
    pub source: Source,
}

/// Errors raised while validating parsed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A value is stored under a name the schema never declared.
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// A value does not match the declared kind.
    #[error("option {name} expects a {expected:?} value, got {found:?}")]
    KindMismatch {
        /// Option name.
        name: String,
        /// Declared kind.
        expected: ValueKind,
        /// Kind of the stored value.
        found: ValueKind,
    },
    /// A positional slot received more tokens than its arity allows.
    #[error("too many values for {name}: at most {max} allowed, got {found}")]
    TooManyValues {
        /// Option name.
        name: String,
        /// Arity bound.
        max: usize,
        /// Number of values stored.
        found: usize,
    },
    /// An option was given without another option it depends on.
    #[error("--{option} requires --{requires}")]
    Requires {
        /// The dependent option.
        option: String,
        /// The option it depends on.
        requires: String,
    },
}

/// Flat mapping of parsed option values.
///
/// # Examples
///
/// ```
/// use dbshell_options_core::{ParsedEnvironment, Source, Value};
///
/// let mut env = ParsedEnvironment::new();
/// env.insert("password", Value::from(""), Source::CommandLine);
///
/// assert!(env.count("password"));
/// assert_eq!(env.get_str("password"), Some(""));
/// assert!(!env.count("username"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedEnvironment {
    entries: BTreeMap<String, Entry>,
}

impl ParsedEnvironment {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, replacing any previous one.
    pub fn insert(&mut self, name: &str, value: Value, source: Source) {
        self.entries
            .insert(name.to_string(), Entry { value, source });
    }

    /// Returns `true` when any value is stored under `name`.
    pub fn count(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the stored value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).map(|e| &e.value)
    }

    /// Returns where the stored value came from.
    pub fn source(&self, name: &str) -> Option<Source> {
        self.entries.get(name).map(|e| e.source)
    }

    /// Returns a stored string value.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns a stored list value.
    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Value::as_list)
    }

    /// Iterates entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks every stored value against the schema.
    ///
    /// # Errors
    ///
    /// Returns the first value whose name is undeclared, whose kind differs
    /// from the declaration, or that exceeds its positional arity.
    pub fn validate(&self, schema: &OptionSchema) -> Result<(), ValidationError> {
        for (name, entry) in &self.entries {
            let Some(option) = schema.find(name) else {
                return Err(ValidationError::UnknownOption(name.clone()));
            };
            if entry.value.kind() != option.kind {
                return Err(ValidationError::KindMismatch {
                    name: name.clone(),
                    expected: option.kind,
                    found: entry.value.kind(),
                });
            }

            let bound = schema
                .find_positional(name)
                .and_then(|(_, positional)| positional.arity.max());
            if let (Some(max), Some(items)) = (bound, entry.value.as_list()) {
                if items.len() > max {
                    return Err(ValidationError::TooManyValues {
                        name: name.clone(),
                        max,
                        found: items.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arity, OptionDescriptor, PositionalDescriptor};

    fn schema() -> OptionSchema {
        let mut schema = OptionSchema::new("options");
        schema
            .add_option(OptionDescriptor::switch("nodb", ""))
            .unwrap();
        schema
            .add_option(OptionDescriptor::string_list("pair", "").hidden())
            .unwrap();
        schema
            .add_positional(PositionalDescriptor::new("pair", Arity::Exactly(2)))
            .unwrap();
        schema
    }

    #[test]
    fn test_count_includes_defaults() {
        let mut env = ParsedEnvironment::new();
        env.insert("authenticationMechanism", Value::from("MONGODB-CR"), Source::Default);

        assert!(env.count("authenticationMechanism"));
        assert_eq!(env.source("authenticationMechanism"), Some(Source::Default));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_validate_accepts_matching_values() {
        let mut env = ParsedEnvironment::new();
        env.insert("nodb", Value::Switch(true), Source::CommandLine);
        env.insert(
            "pair",
            Value::from(vec!["a".to_string(), "b".to_string()]),
            Source::CommandLine,
        );
        assert_eq!(env.validate(&schema()), Ok(()));
    }

    #[test]
    fn test_validate_rejects_unknown_and_mismatched() {
        let mut env = ParsedEnvironment::new();
        env.insert("bogus", Value::Switch(true), Source::CommandLine);
        assert_eq!(
            env.validate(&schema()),
            Err(ValidationError::UnknownOption("bogus".to_string()))
        );

        let mut env = ParsedEnvironment::new();
        env.insert("nodb", Value::from("yes"), Source::Environment);
        assert_eq!(
            env.validate(&schema()),
            Err(ValidationError::KindMismatch {
                name: "nodb".to_string(),
                expected: ValueKind::Switch,
                found: ValueKind::String,
            })
        );
    }

    #[test]
    fn test_validate_enforces_positional_arity() {
        let mut env = ParsedEnvironment::new();
        env.insert(
            "pair",
            Value::from(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
            Source::CommandLine,
        );
        assert_eq!(
            env.validate(&schema()),
            Err(ValidationError::TooManyValues {
                name: "pair".to_string(),
                max: 2,
                found: 3,
            })
        );
    }
}
