//! The application: command registry, global options and dispatch.
//!
//! An [`Application`] owns every registered command together with the
//! global options shared by all of them. It turns a raw command line into a
//! command invocation and runs it through the lifecycle:
//!
//! 1. Split the line into tokens and apply the reserved global flags
//! 2. Resolve the longest dotted prefix to a registered command
//! 3. Parse and validate the command's fields
//! 4. Run the command's `init` hook, then `run`
//!
//! [`Application::fire`] maps every failure to a process exit code.

mod application;
mod options;

pub use application::{Application, ApplicationBuilder, Resolution};
pub use options::OptionTable;
