//! Per-run parse state of a command.

use std::collections::BTreeMap;

use tracing::debug;

use crate::app::OptionTable;
use crate::error::{EmberError, Result};
use crate::field::{normalize_alias, Field, Value, ValueType};

use super::schema::CommandSchema;
use super::tokens;

/// One execution of a command: its tokens and the values parsed from them.
///
/// An invocation is created by the application for each command line,
/// parsed and validated once, handed to the command's `init` and `run`,
/// then dropped.
#[derive(Debug, Clone)]
pub struct Invocation {
    name: String,
    schema: CommandSchema,
    tokens: Vec<String>,
    values: BTreeMap<String, Value>,
}

impl Invocation {
    pub fn new(name: impl Into<String>, schema: CommandSchema, tokens: Vec<String>) -> Self {
        Self {
            name: name.into(),
            schema,
            tokens,
            values: BTreeMap::new(),
        }
    }

    /// Dotted name of the command being run.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full token list, including the command name echo.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn schema(&self) -> &CommandSchema {
        &self.schema
    }

    /// Tokenize a command line, then [`parse`](Self::parse) and
    /// [`validate`](Self::validate) it.
    pub fn parse_line(&mut self, command_line: &str, globals: &mut OptionTable) -> Result<()> {
        debug!("Parse command line: {}", command_line);
        self.tokens = tokens::split(command_line)?;
        self.parse(globals)?;
        self.validate()
    }

    /// Assign field values from the tokens.
    ///
    /// The first non-option tokens, one per segment of the command's dotted
    /// name, are the name itself and are skipped. Options may appear
    /// anywhere; options unknown to both the command and `globals` are
    /// ignored. Global options are stored in `globals`.
    pub fn parse(&mut self, globals: &mut OptionTable) -> Result<()> {
        self.values.clear();
        let mut name_parts = self.name.split('.').count();
        let mut positionals = Vec::new();
        let mut index = 0;

        while index < self.tokens.len() {
            let token = self.tokens[index].clone();
            index += 1;

            if !tokens::is_option(&token) {
                if name_parts > 0 {
                    name_parts -= 1;
                } else {
                    positionals.push(token);
                }
                continue;
            }

            let (option, inline) = match token.split_once('=') {
                Some((option, value)) => (option, Some(value)),
                None => (token.as_str(), None),
            };
            let alias = normalize_alias(option);

            if let Some(field) = self.schema.option(&alias).cloned() {
                let raw = self.option_value(&field, inline, &mut index);
                let value = field.convert(raw.as_deref())?;
                debug!("Option \"{}\" = {}", field.name(), value);
                self.values.insert(field.name().to_string(), value);
            } else if let Some((canonical, field)) = globals.lookup(&alias) {
                let canonical = canonical.to_string();
                let field = field.clone();
                let raw = self.option_value(&field, inline, &mut index);
                let value = field.convert(raw.as_deref())?;
                debug!("Global option \"{}\" = {}", canonical, value);
                globals.set(&canonical, value);
            } else {
                debug!("Ignoring unknown option \"{}\"", option);
            }
        }

        self.assign_arguments(positionals)
    }

    /// Inline `=value`, else the next token for non-boolean fields.
    fn option_value(
        &self,
        field: &Field,
        inline: Option<&str>,
        index: &mut usize,
    ) -> Option<String> {
        if let Some(value) = inline {
            return Some(value.to_string());
        }
        if field.resolved_type() == ValueType::Boolean {
            return None;
        }
        let next = self.tokens.get(*index).cloned();
        if next.is_some() {
            *index += 1;
        }
        next
    }

    /// A list argument takes every remaining positional token, verbatim.
    fn assign_arguments(&mut self, positionals: Vec<String>) -> Result<()> {
        let arguments: Vec<Field> = self.schema.arguments().cloned().collect();
        for (field, (index, raw)) in arguments.iter().zip(positionals.iter().enumerate()) {
            if field.resolved_type() == ValueType::List {
                let name = field.name().to_string();
                let rest = positionals[index..].to_vec();
                debug!("Argument \"{}\" = {:?}", name, rest);
                self.values.insert(name, Value::List(rest));
                break;
            }
            let value = field.convert(Some(raw))?;
            debug!("Argument \"{}\" = {}", field.name(), value);
            self.values.insert(field.name().to_string(), value);
        }
        Ok(())
    }

    /// Fill defaults for unset fields.
    ///
    /// # Errors
    ///
    /// Returns `FieldRequired` for the first unset field without a default,
    /// arguments first.
    pub fn validate(&mut self) -> Result<()> {
        let fields: Vec<Field> = self
            .schema
            .arguments()
            .chain(self.schema.options())
            .cloned()
            .collect();
        for field in fields {
            if self.values.contains_key(field.name()) {
                continue;
            }
            match field.default_value() {
                Some(default) => {
                    let name = field.name().to_string();
                    self.values.insert(name, default.clone());
                }
                None => {
                    return Err(EmberError::FieldRequired {
                        role: field.role(),
                        name: field.name().to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Register a field after parsing, typically from a command's `init`.
    /// The field takes its default value, if it has one.
    ///
    /// # Errors
    ///
    /// `Configuration` when the name or an alias is already taken; current
    /// values are left untouched.
    pub fn add_field(&mut self, field: Field) -> Result<()> {
        let name = field.name().to_string();
        let default = field.default_value().cloned();
        self.schema.insert(field)?;
        if let Some(default) = default {
            self.values.insert(name, default);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// String value of a field; `None` when unset or of another type.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    /// Boolean value of a field; `false` when unset.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Value::as_list)
    }

    /// All current values by field name.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }
}
