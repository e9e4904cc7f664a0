//! Shell command execution.

pub mod command;

pub use command::{run, ShellOptions, ShellResult};
