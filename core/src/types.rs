//! Option schema type definitions.
//!
//! An [`OptionSchema`] is the declared surface of a program: every flag it
//! accepts, the kind of value each flag carries, and how bare positional
//! tokens map onto named options. Schemas are built incrementally and every
//! registration is checked against what was declared before it, so a schema
//! that exists is always structurally valid.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validate::{SchemaError, check_option, check_positional};

/// Kind of value an option carries.
///
/// # Examples
///
/// ```
/// use dbshell_options_core::ValueKind;
///
/// assert!(!ValueKind::Switch.takes_value());
/// assert!(ValueKind::StringList.takes_value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Boolean flag; presence alone sets it.
    Switch,
    /// A single string value.
    String,
    /// An ordered list of strings.
    StringList,
}

impl ValueKind {
    /// Returns `true` when the option consumes an argument.
    pub fn takes_value(self) -> bool {
        !matches!(self, ValueKind::Switch)
    }
}

/// Whether an option shows up in generated help output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Visibility {
    /// Listed in help output (the default).
    #[default]
    Public,
    /// Accepted on the command line but never listed.
    Hidden,
}

/// A concrete option value.
///
/// # Examples
///
/// ```
/// use dbshell_options_core::{Value, ValueKind};
///
/// let value = Value::from("MONGODB-CR");
/// assert_eq!(value.kind(), ValueKind::String);
/// assert_eq!(value.as_str(), Some("MONGODB-CR"));
/// assert_eq!(value.as_bool(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Value of a switch.
    Switch(bool),
    /// Value of a string option.
    String(String),
    /// Value of a string-list option.
    StringList(Vec<String>),
}

impl Value {
    /// Returns the kind this value belongs to.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Switch(_) => ValueKind::Switch,
            Value::String(_) => ValueKind::String,
            Value::StringList(_) => ValueKind::StringList,
        }
    }

    /// Borrows the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrows the list payload, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::StringList(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the switch state, if this is a switch value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Switch(on) => Some(*on),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Switch(on) => write!(f, "{on}"),
            Value::String(s) => f.write_str(s),
            Value::StringList(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Switch(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::StringList(value)
    }
}

/// Declaration of a single named option.
///
/// The long spelling defaults to the option name. Use the constructors
/// [`switch`](OptionDescriptor::switch), [`string`](OptionDescriptor::string)
/// and [`string_list`](OptionDescriptor::string_list), then chain builder
/// methods.
///
/// # Examples
///
/// ```
/// use dbshell_options_core::{OptionDescriptor, ValueKind};
///
/// let username = OptionDescriptor::string("username", "username for authentication")
///     .with_short('u');
/// assert_eq!(username.kind, ValueKind::String);
/// assert_eq!(username.spelling(), "-u [ --username ]");
///
/// let quiet = OptionDescriptor::switch("quiet", "be less chatty");
/// assert_eq!(quiet.spelling(), "--quiet");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Unique key the parsed value is stored under.
    pub name: String,
    /// Long flag spelling, without the leading `--`.
    pub long: String,
    /// Optional one-character short spelling.
    pub short: Option<char>,
    /// Kind of value the option carries.
    pub kind: ValueKind,
    /// Help visibility.
    #[serde(default)]
    pub visibility: Visibility,
    /// One-line description for help output.
    #[serde(default)]
    pub description: String,
    /// Value stored when the option is not supplied at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Value stored when the flag is given without an argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit_value: Option<Value>,
    /// Environment variable consulted when the flag is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

impl OptionDescriptor {
    /// Creates a descriptor of the given kind.
    pub fn new(name: &str, kind: ValueKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            long: name.to_string(),
            short: None,
            kind,
            visibility: Visibility::Public,
            description: description.to_string(),
            default_value: None,
            implicit_value: None,
            env: None,
        }
    }

    /// Creates a switch.
    pub fn switch(name: &str, description: &str) -> Self {
        Self::new(name, ValueKind::Switch, description)
    }

    /// Creates a single-valued string option.
    pub fn string(name: &str, description: &str) -> Self {
        Self::new(name, ValueKind::String, description)
    }

    /// Creates a string-list option.
    pub fn string_list(name: &str, description: &str) -> Self {
        Self::new(name, ValueKind::StringList, description)
    }

    /// Sets the short spelling.
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Overrides the long spelling.
    pub fn with_long(mut self, long: &str) -> Self {
        self.long = long.to_string();
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the implicit value.
    pub fn with_implicit(mut self, value: impl Into<Value>) -> Self {
        self.implicit_value = Some(value.into());
        self
    }

    /// Binds an environment variable.
    pub fn with_env(mut self, var: &str) -> Self {
        self.env = Some(var.to_string());
        self
    }

    /// Hides the option from help output.
    pub fn hidden(mut self) -> Self {
        self.visibility = Visibility::Hidden;
        self
    }

    /// Returns `true` for hidden options.
    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden
    }

    /// Returns the flag as shown in help output, e.g. `-p [ --password ]`.
    pub fn spelling(&self) -> String {
        match self.short {
            Some(short) => format!("-{short} [ --{} ]", self.long),
            None => format!("--{}", self.long),
        }
    }
}

/// Number of tokens a positional slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// Exactly this many tokens.
    Exactly(usize),
    /// All remaining tokens.
    Unbounded,
}

impl Arity {
    /// Upper bound on accepted tokens, `None` when unbounded.
    pub fn max(self) -> Option<usize> {
        match self {
            Arity::Exactly(n) => Some(n),
            Arity::Unbounded => None,
        }
    }
}

/// Maps bare positional tokens onto a declared option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalDescriptor {
    /// Name of the option the tokens are stored under.
    pub name: String,
    /// How many tokens this slot consumes.
    pub arity: Arity,
}

impl PositionalDescriptor {
    /// Creates a positional slot for an already declared option.
    pub fn new(name: &str, arity: Arity) -> Self {
        Self {
            name: name.to_string(),
            arity,
        }
    }
}

/// Ordered collection of option and positional declarations.
///
/// # Examples
///
/// ```
/// use dbshell_options_core::*;
///
/// let mut schema = OptionSchema::new("options");
/// schema.add_option(OptionDescriptor::switch("nodb", "don't connect on startup")).unwrap();
/// schema.add_option(OptionDescriptor::string_list("files", "files").hidden()).unwrap();
/// schema.add_positional(PositionalDescriptor::new("files", Arity::Unbounded)).unwrap();
///
/// // Names are unique.
/// let err = schema.add_option(OptionDescriptor::switch("nodb", "again")).unwrap_err();
/// assert_eq!(err, SchemaError::DuplicateOption("nodb".into()));
/// assert!(schema.find("files").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSchema {
    /// Section title used in help output.
    pub title: String,
    options: Vec<OptionDescriptor>,
    positionals: Vec<PositionalDescriptor>,
}

impl OptionSchema {
    /// Creates an empty schema.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Registers an option.
    ///
    /// # Errors
    ///
    /// Fails when the name or a spelling is already taken, a spelling is
    /// malformed, or a default/implicit value does not match the kind.
    pub fn add_option(&mut self, option: OptionDescriptor) -> Result<(), SchemaError> {
        check_option(self, &option)?;
        self.options.push(option);
        Ok(())
    }

    /// Registers a positional slot.
    ///
    /// # Errors
    ///
    /// Fails when the slot names an undeclared option, repeats a slot,
    /// follows an unbounded slot, or its arity does not fit the option kind.
    pub fn add_positional(&mut self, positional: PositionalDescriptor) -> Result<(), SchemaError> {
        check_positional(self, &positional)?;
        self.positionals.push(positional);
        Ok(())
    }

    /// All options in declaration order.
    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    /// All positional slots in declaration order.
    pub fn positionals(&self) -> &[PositionalDescriptor] {
        &self.positionals
    }

    /// Finds an option by name.
    pub fn find(&self, name: &str) -> Option<&OptionDescriptor> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Finds the positional slot filling `name` along with its zero-based index.
    pub fn find_positional(&self, name: &str) -> Option<(usize, &PositionalDescriptor)> {
        self.positionals
            .iter()
            .enumerate()
            .find(|(_, p)| p.name == name)
    }

    /// Options that appear in help output.
    pub fn visible_options(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.options.iter().filter(|o| !o.is_hidden())
    }
}
