//! Terminal UI.

use console::Term;
use std::io::Write;

use crate::error::{EmberError, Result};

use super::prompts::ask_user;
use super::{
    should_use_colors, EmberTheme, LiveStatus, OutputMode, StatusHandle, Table, UserInterface,
};

/// Terminal UI implementation.
///
/// Messages go to stdout, warnings and errors to stderr. Colors are used
/// only on a terminal without `NO_COLOR`, and can be turned off with
/// [`UserInterface::set_ansi`].
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: EmberTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            EmberTheme::new()
        } else {
            EmberTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }

    fn print(&mut self, line: &str) {
        if self.mode.shows_messages() {
            writeln!(self.out, "{}", line).ok();
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn set_ansi(&mut self, enabled: bool) {
        self.theme = if enabled && should_use_colors() {
            EmberTheme::new()
        } else {
            EmberTheme::plain()
        };
    }

    fn message(&mut self, msg: &str) {
        self.print(msg);
    }

    fn info(&mut self, msg: &str) {
        let line = self.theme.format_info(msg);
        self.print(&line);
    }

    fn success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.print(&line);
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_messages() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn debug(&mut self, msg: &str) {
        if self.mode.shows_debug() {
            let line = self.theme.format_debug(msg);
            self.print(&line);
        }
    }

    fn heading(&mut self, title: &str) {
        let line = self.theme.format_heading(title);
        self.print(&line);
    }

    fn table(&mut self, table: &Table) {
        if !table.is_empty() {
            let rendered = table.render_with(&self.theme);
            self.print(&rendered);
        }
    }

    fn ask(&mut self, question: &str, choices: &[&str]) -> Result<String> {
        if !self.is_interactive() {
            return choices.first().map(|c| c.to_string()).ok_or_else(|| {
                EmberError::command(format!("Cannot ask \"{}\" without a terminal", question))
            });
        }
        ask_user(question, choices, &self.out)
    }

    fn start_status(&mut self, message: &str) -> Box<dyn StatusHandle> {
        if self.mode.shows_status_line() && self.is_interactive() {
            Box::new(LiveStatus::new(message, self.theme.clone()))
        } else {
            self.info(message);
            Box::new(LiveStatus::hidden())
        }
    }

    fn is_interactive(&self) -> bool {
        self.out.is_term()
    }
}

/// Create the terminal UI.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
