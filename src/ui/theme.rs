//! Visual theme and styling.

use console::Style;

/// Colors for each kind of message.
#[derive(Debug, Clone)]
pub struct EmberTheme {
    /// Informational messages (blue).
    pub info: Style,
    /// Success messages (green).
    pub success: Style,
    /// Warning messages (yellow).
    pub warning: Style,
    /// Error messages (red bold).
    pub error: Style,
    /// Debug messages (dim).
    pub debug: Style,
    /// Section headings (bold).
    pub heading: Style,
    /// Key columns of tables, command names (cyan).
    pub key: Style,
    /// Table borders and elapsed times (dim).
    pub dim: Style,
}

impl Default for EmberTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl EmberTheme {
    pub fn new() -> Self {
        Self {
            info: Style::new().blue(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            debug: Style::new().dim(),
            heading: Style::new().bold(),
            key: Style::new().cyan(),
            dim: Style::new().dim(),
        }
    }

    /// A theme without colors (for non-TTY or `--no-ansi`).
    pub fn plain() -> Self {
        Self {
            info: Style::new(),
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            debug: Style::new(),
            heading: Style::new(),
            key: Style::new(),
            dim: Style::new(),
        }
    }

    pub fn format_info(&self, msg: &str) -> String {
        self.info.apply_to(msg).to_string()
    }

    pub fn format_success(&self, msg: &str) -> String {
        self.success.apply_to(format!("✓ {}", msg)).to_string()
    }

    pub fn format_warning(&self, msg: &str) -> String {
        self.warning.apply_to(format!("⚠ {}", msg)).to_string()
    }

    pub fn format_error(&self, msg: &str) -> String {
        self.error.apply_to(format!("✗ {}", msg)).to_string()
    }

    pub fn format_debug(&self, msg: &str) -> String {
        self.debug.apply_to(format!("· {}", msg)).to_string()
    }

    pub fn format_heading(&self, title: &str) -> String {
        self.heading.apply_to(title).to_string()
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_keeps_icons() {
        let theme = EmberTheme::plain();
        assert_eq!(theme.format_success("Done"), "✓ Done");
        assert_eq!(theme.format_warning("Careful"), "⚠ Careful");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
        assert_eq!(theme.format_debug("trace"), "· trace");
    }

    #[test]
    fn plain_theme_has_no_escape_codes() {
        let theme = EmberTheme::plain();
        assert_eq!(theme.format_info("info"), "info");
        assert_eq!(theme.format_heading("Usage:"), "Usage:");
    }

    #[test]
    fn default_impl_matches_new() {
        let default = EmberTheme::default();
        let new = EmberTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
