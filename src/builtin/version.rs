//! The `version` command.

use crate::app::Application;
use crate::command::{Command, CommandResult, Invocation};
use crate::error::Result;
use crate::ui::UserInterface;

/// Prints `<app name> <app version>`.
pub struct VersionCommand;

impl Command for VersionCommand {
    fn name(&self) -> &str {
        "version"
    }

    fn description(&self) -> &str {
        "Display project version"
    }

    fn run(
        &self,
        _args: &Invocation,
        app: &mut Application,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        ui.info(&format!("{} {}", app.name(), app.version()));
        Ok(CommandResult::success())
    }
}
