//! Shell command execution.

use crate::error::{EmberError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct ShellResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output, empty unless captured.
    pub stdout: String,

    /// Standard error, empty unless captured.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,
}

impl ShellResult {
    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }

    pub fn stderr_lines(&self) -> Vec<&str> {
        self.stderr.lines().collect()
    }
}

/// Options for command execution.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Capture stdout and stderr (if false, inherits from parent).
    pub capture_output: bool,

    /// Environment variables (merged with the process environment).
    pub env: HashMap<String, String>,

    /// Working directory of the child. The current process never changes
    /// directory.
    pub cwd: Option<PathBuf>,

    /// Run through the system shell; otherwise the command line is split
    /// and the program is run directly.
    pub shell_mode: bool,

    /// Turn a non-zero exit into `CommandFailed`.
    pub check: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            capture_output: true,
            env: HashMap::new(),
            cwd: None,
            shell_mode: true,
            check: false,
        }
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

fn direct_command(command: &str) -> Result<Command> {
    let args = shlex::split(command).ok_or_else(|| EmberError::InvalidCommandLine {
        line: command.to_string(),
    })?;
    let (program, args) = args
        .split_first()
        .ok_or_else(|| EmberError::InvalidCommandLine {
            line: command.to_string(),
        })?;
    let mut cmd = Command::new(program);
    cmd.args(args);
    Ok(cmd)
}

/// Run a command and wait for it.
///
/// A non-zero exit is returned as a normal result unless `check` is set.
///
/// # Errors
///
/// `CommandFailed` when the command cannot be started, or exits non-zero
/// with `check` set.
pub fn run(command: &str, options: &ShellOptions) -> Result<ShellResult> {
    let start = Instant::now();

    let mut cmd = if options.shell_mode {
        shell_command(command)
    } else {
        direct_command(command)?
    };

    if let Some(cwd) = &options.cwd {
        debug!("Shell path: {}", cwd.display());
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    if options.capture_output {
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
    }

    debug!("Shell: {}", command);
    let output = cmd.output().map_err(|e| {
        debug!("Failed to start \"{}\": {}", command, e);
        EmberError::CommandFailed {
            command: command.to_string(),
            code: None,
        }
    })?;

    let result = ShellResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
    };

    if options.check && !result.success() {
        return Err(EmberError::CommandFailed {
            command: command.to_string(),
            code: result.exit_code,
        });
    }
    Ok(result)
}
