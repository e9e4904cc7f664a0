//! Field descriptors for command arguments and options.
//!
//! A [`Field`] describes one declared parameter of a command: its position
//! (arguments) or aliases (options), its type, default and help text. Fields
//! are built once with the builder methods and never change afterwards.
//!
//! # Example
//!
//! ```
//! use ember::field::{Field, Value, ValueType};
//!
//! let age = Field::argument("age", 2).default(18).help("Contact age");
//! assert!(!age.is_option());
//! assert_eq!(age.resolved_type(), ValueType::Integer);
//! assert_eq!(age.convert(Some("20")).unwrap(), Value::Int(20));
//!
//! let quiet = Field::option("quiet").alias("-q").default(true);
//! assert_eq!(quiet.convert(None).unwrap(), Value::Bool(false));
//! ```

mod value;

pub use value::{Value, ValueType};

use std::fmt;

use crate::error::{EmberError, Result};

/// Whether a field is taken by position or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Argument,
    Option,
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argument => f.write_str("argument"),
            Self::Option => f.write_str("option"),
        }
    }
}

/// Normalize an option alias or a command-line option name.
///
/// Strips `--` (or a single `-`) and turns the remaining dashes into
/// underscores, so `--int-option`, `-int-option` and `int_option` all
/// normalize to `int_option`.
pub fn normalize_alias(alias: &str) -> String {
    let stripped = if alias.len() > 2 && alias.starts_with("--") {
        &alias[2..]
    } else if let Some(rest) = alias.strip_prefix('-') {
        rest
    } else {
        alias
    };
    stripped.replace('-', "_")
}

/// One declared argument or option.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    position: Option<usize>,
    aliases: Vec<String>,
    default: Option<Value>,
    value_type: Option<ValueType>,
    help: String,
}

impl Field {
    /// A positional argument. Positions order arguments; they need not be
    /// contiguous.
    pub fn argument(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position: Some(position),
            aliases: Vec::new(),
            default: None,
            value_type: None,
            help: String::new(),
        }
    }

    /// A named option. Its own name is always accepted as a long alias.
    pub fn option(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
            aliases: Vec::new(),
            default: None,
            value_type: None,
            help: String::new(),
        }
    }

    /// Set the help text shown by `help`.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Set a default value, which also makes the field optional.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Add an alias (`-o`, `--int`, or bare `int`).
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add several aliases at once.
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Force the value type instead of inferring it from the default.
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Canonical field name, also accepted as a long alias.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of an argument; `None` for options.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Help text, empty when none was set.
    pub fn help_text(&self) -> &str {
        &self.help
    }

    /// Default value, `None` for required fields.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether this field is taken by name rather than position.
    pub fn is_option(&self) -> bool {
        self.position.is_none()
    }

    /// Whether the field must be given on the command line.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// `argument` or `option`, as named in error messages.
    pub fn role(&self) -> FieldRole {
        if self.is_option() {
            FieldRole::Option
        } else {
            FieldRole::Argument
        }
    }

    /// The declared type, else the default's type, else string for
    /// arguments and boolean for options.
    pub fn resolved_type(&self) -> ValueType {
        if let Some(t) = self.value_type {
            return t;
        }
        match &self.default {
            Some(value) => value.value_type(),
            None if self.is_option() => ValueType::Boolean,
            None => ValueType::String,
        }
    }

    /// All normalized names this option answers to: its name, then its aliases.
    pub fn lookup_names(&self) -> Vec<String> {
        let mut names = vec![normalize_alias(&self.name)];
        for alias in &self.aliases {
            let alias = normalize_alias(alias);
            if !names.contains(&alias) {
                names.push(alias);
            }
        }
        names
    }

    /// Names as shown in help: `-x` for one character, `--long` otherwise.
    pub fn display_aliases(&self) -> Vec<String> {
        self.lookup_names()
            .into_iter()
            .map(|name| {
                let name = name.replace('_', "-");
                if name.chars().count() == 1 {
                    format!("-{}", name)
                } else {
                    format!("--{}", name)
                }
            })
            .collect()
    }

    /// Convert raw command-line text into this field's type.
    ///
    /// `None` means the option appeared without a value, which only makes
    /// sense for booleans: the result is `true`, or the negation of the
    /// default when there is one.
    pub fn convert(&self, raw: Option<&str>) -> Result<Value> {
        let value_type = self.resolved_type();
        let raw = match raw {
            Some(raw) => raw,
            None if value_type == ValueType::Boolean => {
                let toggled = match self.default.as_ref().and_then(Value::as_bool) {
                    Some(default) => !default,
                    None => true,
                };
                return Ok(Value::Bool(toggled));
            }
            None => {
                return Err(EmberError::FieldMissingValue {
                    name: self.name.clone(),
                })
            }
        };

        match value_type {
            ValueType::String => Ok(Value::Str(raw.to_string())),
            ValueType::List => Ok(Value::List(raw.split(',').map(String::from).collect())),
            ValueType::Boolean => Ok(Value::Bool(parse_bool(raw))),
            ValueType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| self.conversion_error(raw, value_type)),
            ValueType::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| self.conversion_error(raw, value_type)),
        }
    }

    fn conversion_error(&self, raw: &str, expected: ValueType) -> EmberError {
        EmberError::FieldConversion {
            role: self.role(),
            name: self.name.clone(),
            value: raw.to_string(),
            expected: expected.to_string(),
        }
    }
}

fn parse_bool(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "false" | "0" | "no" | "off"
    )
}
