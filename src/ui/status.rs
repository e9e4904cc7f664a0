//! Live status line.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::theme::EmberTheme;
use super::StatusHandle;

/// A status line that refreshes in the background, prefixed with the
/// elapsed time, until it is finished or stopped.
///
/// The refresh loop belongs to the `indicatif` bar; the only state shared
/// with the caller is the message text.
pub struct LiveStatus {
    bar: ProgressBar,
    theme: EmberTheme,
}

impl LiveStatus {
    /// Start a status line with a message.
    pub fn new(message: &str, theme: EmberTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.blue} {elapsed:.dim} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(theme.format_info(message));
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar, theme }
    }

    /// A status that draws nothing (for silent mode and non-terminals).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: EmberTheme::plain(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    pub fn elapsed(&self) -> Duration {
        self.bar.elapsed()
    }

    fn finish(&mut self, text: String) {
        if self.bar.is_hidden() {
            return;
        }
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        self.bar.finish_with_message(text);
    }
}

impl StatusHandle for LiveStatus {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(self.theme.format_info(msg));
    }

    fn warn(&mut self, msg: &str) {
        self.bar.set_message(self.theme.format_warning(msg));
    }

    fn finish_success(&mut self, msg: &str) {
        let text = self.theme.format_success(msg);
        self.finish(text);
    }

    fn finish_error(&mut self, msg: &str) {
        let text = self.theme.format_error(msg);
        self.finish(text);
    }

    fn stop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for LiveStatus {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
