//! Built-in commands registered by the application builder.

pub mod help;
mod version;

pub use help::{HelpCommand, HelpData};
pub use version::VersionCommand;
