//! File templates with `${var}` placeholders.
//!
//! # Syntax
//!
//! - `${name}` - replaced with the value of `name`
//! - `$${name}` - produces literal `${name}` in output
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use ember::template::render_str;
//!
//! let mut vars = BTreeMap::new();
//! vars.insert("name".to_string(), "World".to_string());
//! assert_eq!(render_str("greeting", "Hello ${name}!", &vars).unwrap(), "Hello World!");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};
use tracing::debug;

use crate::error::{EmberError, Result};

/// A piece of a template.
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Var(String),
}

fn segments(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            text.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                text.push('$');
                if chars.peek() == Some(&'{') {
                    // `$${x}` stays a literal `${x}`.
                    for c in chars.by_ref() {
                        text.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                }
            }
            Some('{') => {
                chars.next();
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                let name: String = chars.by_ref().take_while(|c| *c != '}').collect();
                segments.push(Segment::Var(name.trim().to_string()));
            }
            _ => text.push(c),
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

/// Render template text. `name` is only used in error messages.
///
/// # Errors
///
/// `Template` when a placeholder has no value in `vars`.
pub fn render_str(name: &str, source: &str, vars: &BTreeMap<String, String>) -> Result<String> {
    let mut rendered = String::with_capacity(source.len());
    for segment in segments(source) {
        match segment {
            Segment::Text(text) => rendered.push_str(&text),
            Segment::Var(var) => match vars.get(&var) {
                Some(value) => rendered.push_str(value),
                None => {
                    return Err(EmberError::Template {
                        name: name.to_string(),
                        message: format!("undefined variable \"{}\"", var),
                    })
                }
            },
        }
    }
    Ok(rendered)
}

/// Replace every marked block of `content` with `block`, or append a new
/// marked block when there is none.
pub fn replace_marked(content: &str, marker: &str, block: &str) -> String {
    let escaped = regex::escape(marker);
    let replacement = format!("{}\n{}\n{}", marker, block, marker);
    match Regex::new(&format!("{}[\\s\\S]*?{}", escaped, escaped)) {
        Ok(pattern) if pattern.is_match(content) => pattern
            .replace_all(content, NoExpand(&replacement))
            .into_owned(),
        _ => format!("{}\n{}\n", content, replacement),
    }
}

/// Templates loaded from a folder.
#[derive(Debug, Clone)]
pub struct Templates {
    folder: PathBuf,
}

impl Templates {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Path of a file inside the template folder.
    pub fn path(&self, name: &str) -> PathBuf {
        self.folder.join(name)
    }

    /// Render the template file `name`.
    pub fn render(&self, name: &str, vars: &BTreeMap<String, String>) -> Result<String> {
        let path = self.path(name);
        let source = fs::read_to_string(&path).map_err(|e| EmberError::Template {
            name: name.to_string(),
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        render_str(name, &source, vars)
    }

    /// Render `name` into `target` and return the file's new content.
    ///
    /// Without a marker the whole file is replaced. With a marker, every
    /// block between two occurrences of the marker is replaced by the
    /// rendered template; when the file has no such block, a new marked
    /// block is appended.
    pub fn write(
        &self,
        name: &str,
        target: &Path,
        marker: Option<&str>,
        vars: &BTreeMap<String, String>,
    ) -> Result<String> {
        let rendered = self.render(name, vars)?;
        debug!("Write template \"{}\" to {}", name, target.display());

        let content = match marker {
            None | Some("") => rendered,
            Some(marker) => {
                let existing = if target.exists() {
                    fs::read_to_string(target)?
                } else {
                    String::new()
                };
                replace_marked(&existing, marker, &rendered)
            }
        };

        fs::write(target, &content)?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn renders_variables() {
        let out = render_str("t", "${a} and ${ b }", &vars(&[("a", "1"), ("b", "2")])).unwrap();
        assert_eq!(out, "1 and 2");
    }

    #[test]
    fn escaped_placeholder_stays_literal() {
        let out = render_str("t", "cost: $5, $${HOME}", &vars(&[])).unwrap();
        assert_eq!(out, "cost: $5, ${HOME}");
    }

    #[test]
    fn undefined_variable_fails() {
        let err = render_str("t", "${missing}", &vars(&[])).unwrap_err();
        assert_eq!(err.to_string(), "Template 't': undefined variable \"missing\"");
    }

    #[test]
    fn marker_block_is_replaced_in_place() {
        let content = "before\n# mark\nold\n# mark\nafter\n";
        assert_eq!(
            replace_marked(content, "# mark", "new"),
            "before\n# mark\nnew\n# mark\nafter\n"
        );
    }

    #[test]
    fn every_marker_pair_is_replaced() {
        let content = "[m]a[m] x [m]b[m]";
        assert_eq!(replace_marked(content, "[m]", "c"), "[m]\nc\n[m] x [m]\nc\n[m]");
    }

    #[test]
    fn missing_marker_appends_block() {
        assert_eq!(replace_marked("line", "# mark", "new"), "line\n# mark\nnew\n# mark\n");
    }

    #[test]
    fn write_without_marker_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("hosts.tpl"), "${ip} ${host}").unwrap();
        let target = temp.path().join("hosts");
        fs::write(&target, "old content").unwrap();

        let templates = Templates::new(temp.path());
        let out = templates
            .write("hosts.tpl", &target, None, &vars(&[("ip", "127.0.0.1"), ("host", "app")]))
            .unwrap();
        assert_eq!(out, "127.0.0.1 app");
        assert_eq!(fs::read_to_string(&target).unwrap(), "127.0.0.1 app");
    }

    #[test]
    fn missing_template_file_is_a_template_error() {
        let temp = TempDir::new().unwrap();
        let templates = Templates::new(temp.path());
        assert!(matches!(
            templates.render("nope.tpl", &vars(&[])),
            Err(EmberError::Template { .. })
        ));
    }
}
