//! Ember - declarative command-line applications.
//!
//! Commands declare their positional arguments and named options as
//! [`field::Field`] tables; the [`app::Application`] parses a command line
//! against them, resolves dotted command names such as `db.create`, and
//! runs the matching command. Help output, version, global options
//! (`--verbose`, `--no-ansi`, `--help`) and exit codes come built in.
//!
//! # Modules
//!
//! - [`app`] - Command registry, resolution and the fire lifecycle
//! - [`builtin`] - The `help` and `version` commands
//! - [`command`] - The `Command` trait and command-line parsing
//! - [`config`] - YAML configuration file with dotted access
//! - [`error`] - Error types, result alias and exit codes
//! - [`field`] - Argument and option descriptors, typed values
//! - [`shell`] - Shell command execution
//! - [`template`] - `${var}` file templates with marked blocks
//! - [`ui`] - Terminal output, live status, tables and prompts
//!
//! # Example
//!
//! ```
//! use ember::app::Application;
//! use ember::command::{CommandResult, FnCommand};
//! use ember::ui::MockUI;
//!
//! let mut app = Application::builder("sample").version("1.0").build().unwrap();
//! app.add_command(
//!     FnCommand::new("greet", |args, _app, ui| {
//!         ui.info(&format!("Hello {}", args.string("name").unwrap_or_default()));
//!         Ok(CommandResult::success())
//!     })
//!     .argument("name", |f| f.default("World")),
//! )
//! .unwrap();
//!
//! let mut ui = MockUI::new();
//! assert_eq!(app.fire(Some("greet Ana"), &mut ui), 0);
//! assert!(ui.has_info("Hello Ana"));
//! ```

pub mod app;
pub mod builtin;
pub mod command;
pub mod config;
pub mod error;
pub mod field;
pub mod shell;
pub mod template;
pub mod ui;

pub use error::{EmberError, Result};
