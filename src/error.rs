//! Error types for Ember operations.
//!
//! This module defines [`EmberError`], the primary error type used throughout
//! the framework, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Registration problems (duplicate aliases, unnamed commands) are
//!   `Configuration` errors raised while the application is being built
//! - Parse problems are field errors and surface to the user with the
//!   field's role, name and expected type
//! - Commands raise their own domain failures with [`EmberError::command`]
//! - [`EmberError::exit_code`] is the single mapping from error kind to the
//!   process exit code used by `Application::fire`

use std::path::PathBuf;
use thiserror::Error;

use crate::field::FieldRole;

/// Exit code when the command line holds no command and no `help` exists.
pub const EXIT_NO_COMMAND: i32 = 10;
/// Exit code when no registered command or group matches.
pub const EXIT_COMMAND_NOT_FOUND: i32 = 20;
/// Exit code for command-level failures.
pub const EXIT_COMMAND_ERROR: i32 = 30;
/// Exit code for field validation and conversion failures.
pub const EXIT_FIELD_ERROR: i32 = 40;

/// Core error type for Ember operations.
#[derive(Debug, Error)]
pub enum EmberError {
    /// Invalid framework setup, detected at registration time.
    #[error("{message}")]
    Configuration { message: String },

    /// A raw value could not be converted to the field's type.
    #[error("The {role} \"{name}\" with the value \"{value}\" must be {expected}")]
    FieldConversion {
        role: FieldRole,
        name: String,
        value: String,
        expected: String,
    },

    /// A required field never received a value.
    #[error("The {role} \"{name}\" is required")]
    FieldRequired { role: FieldRole, name: String },

    /// A non-boolean option was the last token and had no value to consume.
    #[error("The option \"{name}\" requires a value")]
    FieldMissingValue { name: String },

    /// The command line named no command and there is no `help` to fall back to.
    #[error("No command provided.")]
    NoCommandProvided,

    /// The command line could not be tokenized (unbalanced quotes, NUL bytes).
    #[error("Invalid command line: {line}")]
    InvalidCommandLine { line: String },

    /// No command or command group matches the command line.
    #[error("Command \"{name}\" not found.")]
    CommandNotFound { name: String },

    /// A failure raised by a command while running.
    #[error("{message}")]
    Command { message: String },

    /// Shell command failed and the caller asked for the exit code to be checked.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Dotted config path does not exist.
    #[error("Config key not found: {key}")]
    ConfigKeyNotFound { key: String },

    /// Template could not be loaded or rendered.
    #[error("Template '{name}': {message}")]
    Template { name: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmberError {
    /// Create a command-level error, the usual way for a command to fail.
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error comes from field parsing or validation.
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            Self::FieldConversion { .. }
                | Self::FieldRequired { .. }
                | Self::FieldMissingValue { .. }
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoCommandProvided => EXIT_NO_COMMAND,
            Self::CommandNotFound { .. } => EXIT_COMMAND_NOT_FOUND,
            Self::Command { .. } => EXIT_COMMAND_ERROR,
            e if e.is_field_error() => EXIT_FIELD_ERROR,
            _ => 1,
        }
    }
}

/// Result type alias for Ember operations.
pub type Result<T> = std::result::Result<T, EmberError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_error_message_shape() {
        let err = EmberError::FieldConversion {
            role: FieldRole::Option,
            name: "int_option".into(),
            value: "ONE".into(),
            expected: "integer".into(),
        };
        assert_eq!(
            err.to_string(),
            "The option \"int_option\" with the value \"ONE\" must be integer"
        );
    }

    #[test]
    fn required_error_message_shape() {
        let err = EmberError::FieldRequired {
            role: FieldRole::Argument,
            name: "name".into(),
        };
        assert_eq!(err.to_string(), "The argument \"name\" is required");
    }

    #[test]
    fn command_not_found_displays_name() {
        let err = EmberError::CommandNotFound {
            name: "NotExist".into(),
        };
        assert_eq!(err.to_string(), "Command \"NotExist\" not found.");
    }

    #[test]
    fn exit_codes_follow_taxonomy() {
        assert_eq!(EmberError::NoCommandProvided.exit_code(), 10);
        assert_eq!(
            EmberError::CommandNotFound { name: "x".into() }.exit_code(),
            20
        );
        assert_eq!(EmberError::command("boom").exit_code(), 30);
        assert_eq!(
            EmberError::FieldMissingValue { name: "x".into() }.exit_code(),
            40
        );
        assert_eq!(EmberError::configuration("dup").exit_code(), 1);
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = EmberError::CommandFailed {
            command: "make build".into(),
            code: Some(2),
        };
        let msg = err.to_string();
        assert!(msg.contains("make build"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: EmberError = io_err.into();
        assert!(matches!(err, EmberError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn anyhow_errors_wrap_transparently() {
        let err: EmberError = anyhow::anyhow!("wrapped failure").into();
        assert_eq!(err.to_string(), "wrapped failure");
    }
}
