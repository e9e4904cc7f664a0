//! Command definitions and command-line parsing.
//!
//! Each command implements the [`Command`] trait, which declares its dotted
//! name, description and fields, and provides the `init` and `run` steps of
//! the execution lifecycle.
//!
//! # Architecture
//!
//! - [`schema`] - Field index with alias collision detection
//! - [`invocation`] - Per-run token parsing and validation
//! - [`function`] - Commands built from closures
//! - [`tokens`] - Shell-style command line splitting
//!
//! # Example
//!
//! ```
//! use ember::app::Application;
//! use ember::command::{Command, CommandResult, Invocation};
//! use ember::field::Field;
//! use ember::ui::{MockUI, UserInterface};
//! use ember::Result;
//!
//! struct Contact;
//!
//! impl Command for Contact {
//!     fn name(&self) -> &str {
//!         "contact"
//!     }
//!
//!     fn fields(&self) -> Vec<Field> {
//!         vec![
//!             Field::argument("name", 1),
//!             Field::argument("age", 2).default(18),
//!         ]
//!     }
//!
//!     fn run(
//!         &self,
//!         args: &Invocation,
//!         _app: &mut Application,
//!         ui: &mut dyn UserInterface,
//!     ) -> Result<CommandResult> {
//!         let name = args.string("name").unwrap_or_default();
//!         let age = args.int("age").unwrap_or_default();
//!         ui.info(&format!("Contact {} with {} years old", name, age));
//!         Ok(CommandResult::success())
//!     }
//! }
//!
//! let mut app = Application::builder("sample").build().unwrap();
//! app.add_command(Contact).unwrap();
//!
//! let mut ui = MockUI::new();
//! assert_eq!(app.fire(Some("contact Ana"), &mut ui), 0);
//! assert!(ui.has_info("Contact Ana with 18 years old"));
//! ```

pub mod function;
pub mod invocation;
pub mod schema;
pub mod tokens;

pub use function::FnCommand;
pub use invocation::Invocation;
pub use schema::CommandSchema;

use crate::app::Application;
use crate::error::Result;
use crate::field::Field;
use crate::ui::UserInterface;

/// A command definition.
///
/// Definitions are stateless: the values of one run live in the
/// [`Invocation`] passed to `init` and `run`.
pub trait Command {
    /// Dotted name, e.g. `db.create`.
    fn name(&self) -> &str;

    /// One-line description shown in help.
    fn description(&self) -> &str {
        ""
    }

    /// The fields this command accepts.
    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }

    /// Runs after parsing and validation, before [`Command::run`]. May add
    /// fields to the invocation based on the values already parsed.
    fn init(
        &self,
        _args: &mut Invocation,
        _app: &mut Application,
        _ui: &mut dyn UserInterface,
    ) -> Result<()> {
        Ok(())
    }

    /// Execute the command.
    fn run(
        &self,
        args: &Invocation,
        app: &mut Application,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// A zero code is a success, anything else a failure with that code.
impl From<i32> for CommandResult {
    fn from(code: i32) -> Self {
        if code == 0 {
            Self::success()
        } else {
            Self::failure(code)
        }
    }
}

impl From<()> for CommandResult {
    fn from(_: ()) -> Self {
        Self::success()
    }
}
