//! Commands built from closures.

use crate::app::Application;
use crate::error::Result;
use crate::field::Field;
use crate::ui::UserInterface;

use super::{Command, CommandResult, Invocation};

type Action =
    Box<dyn Fn(&Invocation, &mut Application, &mut dyn UserInterface) -> Result<CommandResult>>;

/// A command whose metadata is declared explicitly and whose action is a
/// closure.
///
/// Arguments get positions in declaration order. Options get the first
/// letter of their name as a short alias unless another option of the
/// command already claimed it.
///
/// # Example
///
/// ```
/// use ember::command::{CommandResult, FnCommand};
///
/// let greet = FnCommand::new("greet", |args, _app, ui| {
///     let name = args.string("name").unwrap_or("World");
///     let end = args.string("end_char").unwrap_or("?");
///     ui.success(&format!("Hello {}{}", name, end));
///     Ok(CommandResult::success())
/// })
/// .description("Greets the user")
/// .argument("name", |f| f.default("World").help("Name of the user to greet"))
/// .option("end_char", |f| f.default("?").help("Character to end with"));
/// ```
pub struct FnCommand {
    name: String,
    description: String,
    fields: Vec<Field>,
    action: Action,
}

impl FnCommand {
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&Invocation, &mut Application, &mut dyn UserInterface) -> Result<CommandResult>
            + 'static,
    {
        Self {
            name: name.into(),
            description: String::new(),
            fields: Vec::new(),
            action: Box::new(action),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare the next positional argument.
    pub fn argument(mut self, name: &str, configure: impl FnOnce(Field) -> Field) -> Self {
        let position = self.fields.iter().filter(|f| !f.is_option()).count() + 1;
        self.fields.push(configure(Field::argument(name, position)));
        self
    }

    /// Declare an option.
    pub fn option(mut self, name: &str, configure: impl FnOnce(Field) -> Field) -> Self {
        let mut field = Field::option(name);
        if let Some(short) = name.chars().next().map(String::from) {
            let taken = self
                .fields
                .iter()
                .any(|f| f.is_option() && f.lookup_names().contains(&short));
            if !taken && short != name {
                field = field.alias(short);
            }
        }
        self.fields.push(configure(field));
        self
    }
}

impl Command for FnCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn fields(&self) -> Vec<Field> {
        self.fields.clone()
    }

    fn run(
        &self,
        args: &Invocation,
        app: &mut Application,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        (self.action)(args, app, ui)
    }
}
