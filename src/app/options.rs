//! Global option table.

use std::collections::BTreeMap;

use crate::error::{EmberError, Result};
use crate::field::{normalize_alias, Field, Value};

#[derive(Debug, Clone)]
enum OptionEntry {
    Canonical { field: Field, value: Option<Value> },
    Redirect(String),
}

/// Options shared by every command, with their current values.
///
/// Each option is stored under its normalized name together with its
/// current value; every alias is a redirect to that entry. Redirects are
/// only created alongside their canonical entry, so they never dangle.
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    entries: BTreeMap<String, OptionEntry>,
    order: Vec<String>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a global option. Its current value starts as its default.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when the name or an alias is already taken.
    pub fn add(&mut self, field: Field) -> Result<()> {
        if !field.is_option() {
            return Err(EmberError::configuration(format!(
                "Global option \"{}\" must not have a position",
                field.name()
            )));
        }

        let names = field.lookup_names();
        if let Some(taken) = names.iter().find(|n| self.entries.contains_key(*n)) {
            return Err(EmberError::configuration(format!(
                "Duplicate global option alias \"{}\"",
                taken
            )));
        }

        let mut names = names.into_iter();
        let canonical = names.next().unwrap_or_default();
        for alias in names {
            self.entries
                .insert(alias, OptionEntry::Redirect(canonical.clone()));
        }
        let value = field.default_value().cloned();
        self.entries
            .insert(canonical.clone(), OptionEntry::Canonical { field, value });
        self.order.push(canonical);
        Ok(())
    }

    /// Resolve a normalized alias to its canonical name and field.
    pub fn lookup(&self, alias: &str) -> Option<(&str, &Field)> {
        let (name, entry) = self.entries.get_key_value(alias)?;
        match entry {
            OptionEntry::Canonical { field, .. } => Some((name.as_str(), field)),
            OptionEntry::Redirect(target) => match self.entries.get_key_value(target)? {
                (name, OptionEntry::Canonical { field, .. }) => Some((name.as_str(), field)),
                (_, OptionEntry::Redirect(_)) => None,
            },
        }
    }

    /// Set the current value of an option, by name or alias.
    ///
    /// Returns `false` when no such option exists.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        let canonical = match self.lookup(&normalize_alias(name)) {
            Some((canonical, _)) => canonical.to_string(),
            None => return false,
        };
        match self.entries.get_mut(&canonical) {
            Some(OptionEntry::Canonical { value: slot, .. }) => {
                *slot = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Current value of an option, by name or alias.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let (canonical, _) = self.lookup(&normalize_alias(name))?;
        match self.entries.get(canonical)? {
            OptionEntry::Canonical { value, .. } => value.as_ref(),
            OptionEntry::Redirect(_) => None,
        }
    }

    /// Current value of a boolean option; `false` when unset or absent.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(&normalize_alias(name)).is_some()
    }

    /// Registered option fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.order
            .iter()
            .filter_map(|name| match self.entries.get(name) {
                Some(OptionEntry::Canonical { field, .. }) => Some(field),
                _ => None,
            })
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
