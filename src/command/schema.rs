//! Field index of a command.

use std::collections::HashMap;

use crate::error::{EmberError, Result};
use crate::field::Field;

/// The fields of one command, indexed for parsing.
///
/// Arguments are kept ordered by position; options are reachable through
/// every normalized alias. Building the schema is where alias collisions
/// are detected, so a broken command fails at registration instead of on
/// the first parse.
#[derive(Debug, Clone, Default)]
pub struct CommandSchema {
    fields: Vec<Field>,
    arguments: Vec<String>,
    aliases: HashMap<String, String>,
}

impl CommandSchema {
    /// Build the schema for a set of fields.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when two fields share a name or two options
    /// normalize to the same alias.
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        let mut schema = Self::default();
        for field in fields {
            schema.insert(field)?;
        }
        Ok(schema)
    }

    /// Add one field.
    pub fn insert(&mut self, field: Field) -> Result<()> {
        if self.field(field.name()).is_some() {
            return Err(EmberError::configuration(format!(
                "Duplicate field \"{}\"",
                field.name()
            )));
        }

        if field.is_option() {
            let names = field.lookup_names();
            if let Some(taken) = names.iter().find(|n| self.aliases.contains_key(*n)) {
                return Err(EmberError::configuration(format!(
                    "Duplicate option alias \"{}\"",
                    taken
                )));
            }
            for name in names {
                self.aliases.insert(name, field.name().to_string());
            }
        } else {
            // Stable insert: equal positions keep declaration order.
            let position = field.position();
            let index = self
                .arguments
                .iter()
                .position(|n| self.field(n).and_then(Field::position) > position)
                .unwrap_or(self.arguments.len());
            self.arguments.insert(index, field.name().to_string());
        }

        self.fields.push(field);
        Ok(())
    }

    /// Look a field up by its canonical name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Look an option up by normalized alias.
    pub fn option(&self, alias: &str) -> Option<&Field> {
        self.aliases.get(alias).and_then(|name| self.field(name))
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Positional fields, ordered by position.
    pub fn arguments(&self) -> impl Iterator<Item = &Field> {
        self.arguments.iter().filter_map(|name| self.field(name))
    }

    /// Option fields in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_option())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_fields() -> Vec<Field> {
        vec![
            Field::argument("age", 2).default(18),
            Field::argument("name", 1),
            Field::option("int_option").default(1).aliases(["o", "int"]),
            Field::option("str_option").default("default").alias("str"),
        ]
    }

    #[test]
    fn arguments_sorted_by_position() {
        let schema = CommandSchema::new(contact_fields()).unwrap();
        let names: Vec<_> = schema.arguments().map(Field::name).collect();
        assert_eq!(names, vec!["name", "age"]);
    }

    #[test]
    fn options_reachable_by_every_alias() {
        let schema = CommandSchema::new(contact_fields()).unwrap();
        for alias in ["int_option", "o", "int"] {
            assert_eq!(schema.option(alias).unwrap().name(), "int_option");
        }
        assert!(schema.option("name").is_none());
    }

    #[test]
    fn colliding_aliases_fail_at_build() {
        let fields = vec![
            Field::option("output").alias("-o"),
            Field::option("offset").default(0).alias("--o"),
        ];
        let err = CommandSchema::new(fields).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate option alias \"o\"");
    }

    #[test]
    fn alias_colliding_with_field_name_fails() {
        let fields = vec![
            Field::option("str").default("x"),
            Field::option("str_option").default("y").alias("--str"),
        ];
        assert!(CommandSchema::new(fields).is_err());
    }

    #[test]
    fn duplicate_field_names_fail() {
        let fields = vec![Field::argument("name", 1), Field::argument("name", 2)];
        assert!(matches!(
            CommandSchema::new(fields),
            Err(EmberError::Configuration { .. })
        ));
    }

    #[test]
    fn insert_adds_dynamic_field() {
        let mut schema = CommandSchema::new(contact_fields()).unwrap();
        schema
            .insert(Field::option("option_init").default("dynamic"))
            .unwrap();
        assert!(schema.option("option_init").is_some());
        assert_eq!(schema.options().count(), 3);
    }
}
