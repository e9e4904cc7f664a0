//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait through which commands talk to the user
//! - [`TerminalUI`] for terminal output, colored or plain
//! - [`MockUI`] capturing everything for tests
//! - A live status line, borderless tables and prompts
//!
//! # Example
//!
//! ```
//! use ember::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Normal);
//! ui.set_ansi(false);
//! ui.info("Deploying");
//! ui.success("Deployed");
//! ```

pub mod mock;
pub mod output;
pub mod prompts;
pub mod status;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockStatus, MockUI};
pub use output::OutputMode;
pub use status::LiveStatus;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, EmberTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// Commands receive a `&mut dyn UserInterface`, so tests can swap in
/// [`MockUI`].
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode; `--verbose` switches to [`OutputMode::Verbose`].
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Enable or disable ANSI styling.
    fn set_ansi(&mut self, enabled: bool);

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display an informational message.
    fn info(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Always shown.
    fn error(&mut self, msg: &str);

    /// Display a debug message, only in verbose mode.
    fn debug(&mut self, msg: &str);

    /// Display a section heading.
    fn heading(&mut self, title: &str);

    /// Display a table.
    fn table(&mut self, table: &Table);

    /// Ask a question. With choices, the answer must be one of them and
    /// the first is the default.
    fn ask(&mut self, question: &str, choices: &[&str]) -> Result<String>;

    /// Start a live status line for an operation.
    fn start_status(&mut self, message: &str) -> Box<dyn StatusHandle>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a live status line.
pub trait StatusHandle {
    /// Replace the status text.
    fn set_message(&mut self, msg: &str);

    /// Replace the status text with a warning, keeping the status running.
    fn warn(&mut self, msg: &str);

    /// Stop with a success message.
    fn finish_success(&mut self, msg: &str);

    /// Stop with an error message.
    fn finish_error(&mut self, msg: &str);

    /// Stop and clear the line.
    fn stop(&mut self);
}
