//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including debug messages.
    Verbose,
    /// Show messages and live status.
    #[default]
    Normal,
    /// Show nothing except errors.
    Silent,
}

impl OutputMode {
    /// Check if this mode shows debug messages.
    pub fn shows_debug(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows a live status line.
    pub fn shows_status_line(&self) -> bool {
        !matches!(self, Self::Silent)
    }

    /// Check if this mode shows regular messages.
    pub fn shows_messages(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_verbose_shows_debug() {
        assert!(OutputMode::Verbose.shows_debug());
        assert!(!OutputMode::Normal.shows_debug());
        assert!(!OutputMode::Silent.shows_debug());
    }

    #[test]
    fn silent_hides_messages() {
        assert!(OutputMode::Normal.shows_messages());
        assert!(!OutputMode::Silent.shows_messages());
        assert!(!OutputMode::Silent.shows_status_line());
    }

    #[test]
    fn output_mode_default() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }
}
