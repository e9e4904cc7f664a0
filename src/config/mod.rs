//! YAML configuration file.
//!
//! A [`Config`] is bound to one file: the first existing candidate passed
//! to [`Config::load`], or the first candidate when none exists. Values are
//! addressed with dotted paths into nested mappings (`database.host`).
//! Top-level keys starting with `_` are private: they are never read from
//! nor written to the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{EmberError, Result};

/// Expand a leading `~` to the home directory and make the path absolute.
pub fn expand_path(path: &Path) -> PathBuf {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };
    std::path::absolute(&expanded).unwrap_or(expanded)
}

fn is_private(key: &Value) -> bool {
    key.as_str().is_some_and(|k| k.starts_with('_'))
}

fn public(data: &Mapping) -> Mapping {
    data.iter()
        .filter(|(k, _)| !is_private(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Configuration values backed by a YAML file.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    path: PathBuf,
    data: Mapping,
}

impl Config {
    /// An in-memory config bound to `path`, starting from `defaults`.
    pub fn new(path: impl Into<PathBuf>, defaults: &Mapping) -> Self {
        Self {
            path: path.into(),
            data: defaults.clone(),
        }
    }

    /// Load the first existing file among `files`.
    ///
    /// When none exists, the config is bound to the first candidate and,
    /// if `create` is set, written there right away. Returns `None` when
    /// `files` is empty.
    pub fn load(files: &[PathBuf], create: bool, defaults: &Mapping) -> Result<Option<Self>> {
        let Some(first) = files.first() else {
            return Ok(None);
        };

        for file in files {
            let path = expand_path(file);
            debug!("Try read config file {}", path.display());
            if path.exists() {
                let mut config = Self::new(path, defaults);
                config.read()?;
                return Ok(Some(config));
            }
        }

        let config = Self::new(expand_path(first), defaults);
        if create {
            config.write()?;
        }
        Ok(Some(config))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the config file.
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// Merge the file's public top-level keys into the current values.
    ///
    /// Returns `false` when the file does not exist.
    pub fn read(&mut self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let content = fs::read_to_string(&self.path)?;
        let parsed: Value =
            serde_yaml::from_str(&content).map_err(|e| EmberError::ConfigParse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        match parsed {
            Value::Null => {}
            Value::Mapping(mapping) => {
                for (key, value) in mapping {
                    if !is_private(&key) {
                        self.data.insert(key, value);
                    }
                }
            }
            _ => {
                return Err(EmberError::ConfigParse {
                    path: self.path.clone(),
                    message: "expected a mapping at the top level".to_string(),
                })
            }
        }
        Ok(true)
    }

    /// Write the public top-level keys, creating parent directories.
    pub fn write(&self) -> Result<()> {
        debug!("Write config file {}", self.path.display());
        if let Some(dir) = self.dir() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_yaml::to_string(&Value::Mapping(public(&self.data)))
            .map_err(anyhow::Error::from)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Value at a dotted path.
    pub fn get(&self, query: &str) -> Option<&Value> {
        let mut keys = query.split('.');
        let mut item = self.data.get(keys.next()?)?;
        for key in keys {
            item = item.as_mapping()?.get(key)?;
        }
        Some(item)
    }

    /// Value at a dotted path, deserialized.
    pub fn get_as<T: DeserializeOwned>(&self, query: &str) -> Result<Option<T>> {
        match self.get(query) {
            Some(value) => serde_yaml::from_value(value.clone())
                .map(Some)
                .map_err(|e| EmberError::Other(e.into())),
            None => Ok(None),
        }
    }

    /// Set the value at a dotted path.
    ///
    /// # Errors
    ///
    /// `ConfigKeyNotFound` when an intermediate key is missing or is not a
    /// mapping.
    pub fn set(&mut self, query: &str, value: impl Into<Value>) -> Result<()> {
        let (parent, key) = self.parent_mut(query)?;
        parent.insert(Value::String(key), value.into());
        Ok(())
    }

    /// Remove the value at a dotted path and return it.
    ///
    /// # Errors
    ///
    /// `ConfigKeyNotFound` when any key along the path is missing.
    pub fn delete(&mut self, query: &str) -> Result<Value> {
        let (parent, key) = self.parent_mut(query)?;
        parent
            .shift_remove(key.as_str())
            .ok_or_else(|| EmberError::ConfigKeyNotFound {
                key: query.to_string(),
            })
    }

    pub fn contains(&self, query: &str) -> bool {
        self.get(query).is_some()
    }

    pub fn data(&self) -> &Mapping {
        &self.data
    }

    fn parent_mut(&mut self, query: &str) -> Result<(&mut Mapping, String)> {
        let mut keys: Vec<&str> = query.split('.').collect();
        let last = keys.pop().unwrap_or_default().to_string();

        let mut item = &mut self.data;
        for key in keys {
            item = match item.get_mut(key) {
                Some(Value::Mapping(mapping)) => mapping,
                _ => {
                    return Err(EmberError::ConfigKeyNotFound {
                        key: query.to_string(),
                    })
                }
            };
        }
        Ok((item, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn yaml(text: &str) -> Mapping {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn load_without_files_is_none() {
        assert!(Config::load(&[], true, &Mapping::new()).unwrap().is_none());
    }

    #[test]
    fn load_reads_first_existing_file() {
        let temp = TempDir::new().unwrap();
        let second = temp.path().join("second.yml");
        fs::write(&second, "name: second\n").unwrap();

        let files = vec![temp.path().join("missing.yml"), second.clone()];
        let config = Config::load(&files, false, &Mapping::new())
            .unwrap()
            .unwrap();
        assert_eq!(config.path(), second);
        assert_eq!(config.get("name").and_then(Value::as_str), Some("second"));
    }

    #[test]
    fn load_binds_to_first_candidate_and_creates() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("conf").join("app.yml");
        let defaults = yaml("name: sample\n_secret: x\n");

        let config = Config::load(&[first.clone()], true, &defaults)
            .unwrap()
            .unwrap();
        assert_eq!(config.path(), first);
        let written = fs::read_to_string(&first).unwrap();
        assert!(written.contains("name: sample"));
        assert!(!written.contains("_secret"));
    }

    #[test]
    fn load_without_create_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("app.yml");
        Config::load(&[first.clone()], false, &Mapping::new()).unwrap();
        assert!(!first.exists());
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("app.yml");
        fs::write(&file, "name: file\n_hidden: 1\n").unwrap();

        let config = Config::load(&[file], false, &yaml("name: default\nother: 2\n"))
            .unwrap()
            .unwrap();
        assert_eq!(config.get("name").and_then(Value::as_str), Some("file"));
        assert_eq!(config.get("other").and_then(Value::as_i64), Some(2));
        assert!(!config.contains("_hidden"));
    }

    #[test]
    fn dotted_get_set_delete() {
        let mut config = Config::new("/tmp/unused.yml", &yaml("db:\n  host: localhost\n"));
        assert_eq!(
            config.get("db.host").and_then(Value::as_str),
            Some("localhost")
        );
        assert!(config.get("db.port").is_none());
        assert!(config.get("db.host.deeper").is_none());

        config.set("db.port", 5432).unwrap();
        assert_eq!(config.get_as::<u16>("db.port").unwrap(), Some(5432));

        assert_eq!(config.delete("db.host").unwrap(), Value::from("localhost"));
        assert!(!config.contains("db.host"));
    }

    #[test]
    fn get_as_deserializes_sections() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Database {
            host: String,
            port: u16,
        }

        let config = Config::new("/tmp/unused.yml", &yaml("db:\n  host: db.local\n  port: 5433\n"));
        assert_eq!(
            config.get_as::<Database>("db").unwrap(),
            Some(Database {
                host: "db.local".into(),
                port: 5433,
            })
        );
        assert!(config.get_as::<u16>("db.host").is_err());
    }

    #[test]
    fn set_with_missing_intermediate_fails() {
        let mut config = Config::new("/tmp/unused.yml", &Mapping::new());
        let err = config.set("missing.key", "value").unwrap_err();
        assert!(matches!(err, EmberError::ConfigKeyNotFound { .. }));
        assert!(config.delete("missing").is_err());
    }

    #[test]
    fn write_drops_private_keys() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new(temp.path().join("app.yml"), &Mapping::new());
        config.set("visible", true).unwrap();
        config.set("_private", true).unwrap();
        config.write().unwrap();

        let mut reread = Config::new(config.path(), &Mapping::new());
        assert!(reread.read().unwrap());
        assert!(reread.contains("visible"));
        assert!(!reread.contains("_private"));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("app.yml");
        fs::write(&file, "- just\n- a list\n").unwrap();
        let err = Config::load(&[file], false, &Mapping::new()).unwrap_err();
        assert!(matches!(err, EmberError::ConfigParse { .. }));
    }

    #[test]
    fn expand_path_resolves_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path(Path::new("~/app.yml")), home.join("app.yml"));
        }
        assert!(expand_path(Path::new("relative.yml")).is_absolute());
    }
}
