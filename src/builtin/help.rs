//! The `help` command and the data it renders.

use std::collections::BTreeMap;

use crate::app::{Application, Resolution};
use crate::command::{Command, CommandResult, CommandSchema, Invocation};
use crate::error::{EmberError, Result};
use crate::field::{Field, ValueType};
use crate::ui::{Table, UserInterface};

/// A positional argument as shown in help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentHelp {
    pub name: String,
    pub required: bool,
    pub help: String,
}

/// One option field with all the names it answers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionHelp {
    /// Single-character names, e.g. `-o`.
    pub short: Vec<String>,
    /// Long names, e.g. `--int-option`.
    pub long: Vec<String>,
    pub help: String,
}

impl OptionHelp {
    fn from_field(field: &Field) -> Self {
        let (mut short, mut long): (Vec<String>, Vec<String>) = field
            .display_aliases()
            .into_iter()
            .partition(|alias| !alias.starts_with("--"));
        short.sort();
        long.sort();
        Self {
            short,
            long,
            help: field.help_text().to_string(),
        }
    }
}

/// Everything help shows about one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHelp {
    pub name: String,
    pub description: String,
    pub arguments: Vec<ArgumentHelp>,
    pub options: Vec<OptionHelp>,
}

impl CommandHelp {
    fn new(name: &str, description: &str, schema: &CommandSchema) -> Self {
        let arguments = schema
            .arguments()
            .map(|field| ArgumentHelp {
                name: field.name().to_string(),
                required: field.is_required(),
                help: field.help_text().to_string(),
            })
            .collect();
        Self {
            name: name.to_string(),
            description: first_line(description).to_string(),
            arguments,
            options: sorted_options(schema.options()),
        }
    }

    /// `db create [options] <name> [<owner>]`
    pub fn usage(&self) -> String {
        let mut usage = format!("{} [options]", self.name.replace('.', " "));
        for argument in &self.arguments {
            if argument.required {
                usage.push_str(&format!(" <{}>", argument.name));
            } else {
                usage.push_str(&format!(" [<{}>]", argument.name));
            }
        }
        usage
    }
}

/// Help for a command, the global options, and the command listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpData {
    pub command: CommandHelp,
    pub global_options: Vec<OptionHelp>,
    /// Every registered command as `(dotted name, description)`, sorted.
    pub commands: Vec<(String, String)>,
}

impl HelpData {
    /// Collect help for a registered command.
    pub fn collect(app: &Application, name: &str) -> Result<Self> {
        let command = app
            .command(name)
            .ok_or_else(|| EmberError::CommandNotFound {
                name: name.to_string(),
            })?;
        let schema = app
            .schema(name)
            .ok_or_else(|| EmberError::CommandNotFound {
                name: name.to_string(),
            })?;

        Ok(Self {
            command: CommandHelp::new(name, command.description(), schema),
            global_options: sorted_options(app.options().fields()),
            commands: app
                .commands()
                .map(|c| (c.name().to_string(), first_line(c.description()).to_string()))
                .collect(),
        })
    }

    /// Commands grouped by their first dotted segment. Top-level commands
    /// come under the empty group, which sorts first.
    pub fn groups(&self, only: Option<&str>) -> BTreeMap<String, Vec<(String, String)>> {
        let mut groups: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
        for (name, description) in &self.commands {
            let group = match name.split_once('.') {
                Some((group, _)) => group,
                None => "",
            };
            if let Some(only) = only {
                if !name.starts_with(&format!("{}.", only)) {
                    continue;
                }
            }
            groups
                .entry(group.to_string())
                .or_default()
                .push((name.replace('.', " "), description.clone()));
        }
        groups
    }
}

fn first_line(text: &str) -> &str {
    text.trim().lines().next().unwrap_or("")
}

fn sorted_options<'a>(fields: impl Iterator<Item = &'a Field>) -> Vec<OptionHelp> {
    let mut options: Vec<OptionHelp> = fields.map(OptionHelp::from_field).collect();
    options.sort_by(|a, b| a.short.cmp(&b.short));
    options
}

/// Shows help for a command, or the command listing.
pub struct HelpCommand;

impl HelpCommand {
    fn render_command(&self, data: &HelpData, ui: &mut dyn UserInterface) {
        if !data.command.description.is_empty() {
            ui.heading("Description:");
            ui.message(&format!("  {}", data.command.description));
            ui.message("");
        }

        ui.heading("Usage:");
        ui.message(&format!("  {}", data.command.usage()));
        ui.message("");

        if !data.command.arguments.is_empty() {
            let mut table = Table::borderless(2).key_columns(1);
            for argument in &data.command.arguments {
                table.add_row(vec![&argument.name, &argument.help]);
            }
            ui.heading("Arguments:");
            ui.table(&table);
            ui.message("");
        }

        self.render_options("Options:", &data.command.options, ui);
        self.render_options("Global options:", &data.global_options, ui);
    }

    fn render_options(&self, title: &str, options: &[OptionHelp], ui: &mut dyn UserInterface) {
        if options.is_empty() {
            return;
        }
        let mut table = Table::borderless(3).key_columns(2);
        for option in options {
            let short = option.short.join(", ");
            let long = option.long.join(", ");
            table.add_row(vec![&short, &long, &option.help]);
        }
        ui.heading(title);
        ui.table(&table);
        ui.message("");
    }

    fn render_listing(&self, data: &HelpData, only: Option<&str>, ui: &mut dyn UserInterface) {
        ui.heading("Available commands:");
        for (group, commands) in data.groups(only) {
            if !group.is_empty() {
                ui.message(&format!(" {}", group));
            }
            let mut table = Table::borderless(2).key_columns(1);
            for (name, description) in &commands {
                table.add_row(vec![name, description]);
            }
            ui.table(&table);
        }
        ui.message("");
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "Show this help or help for a command"
    }

    fn fields(&self) -> Vec<Field> {
        vec![Field::argument("command", 1)
            .default(vec!["help"])
            .value_type(ValueType::List)
            .help("Command to show help")]
    }

    fn run(
        &self,
        args: &Invocation,
        app: &mut Application,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let target: Vec<String> = match args.list("command") {
            Some(target) if !target.is_empty() => target.to_vec(),
            _ => vec!["help".to_string()],
        };

        match app.resolve(&target)? {
            Resolution::Command(name) => {
                let data = HelpData::collect(app, &name)?;
                self.render_command(&data, ui);
                if name == self.name() {
                    self.render_listing(&data, None, ui);
                }
            }
            Resolution::Group(prefix) => {
                let data = HelpData::collect(app, self.name())?;
                ui.heading("Usage:");
                ui.message(&format!("  {} <command> [options]", prefix.replace('.', " ")));
                ui.message("");
                self.render_listing(&data, Some(&prefix), ui);
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::FnCommand;
    use crate::ui::MockUI;

    fn sample() -> Application {
        let mut app = Application::builder("sample").build().unwrap();
        app.add_command(
            FnCommand::new("contact", |_, _, _| Ok(CommandResult::success()))
                .description("Add a contact\nMore details here")
                .argument("name", |f| f.help("The contact name"))
                .argument("age", |f| f.default(18))
                .option("int_option", |f| f.default(1).alias("int")),
        )
        .unwrap();
        for name in ["db.drop", "db.create", "config.show"] {
            app.add_command(FnCommand::new(name, |_, _, _| Ok(CommandResult::success())))
                .unwrap();
        }
        app
    }

    #[test]
    fn collects_command_help() {
        let app = sample();
        let data = HelpData::collect(&app, "contact").unwrap();
        assert_eq!(data.command.description, "Add a contact");
        assert_eq!(data.command.usage(), "contact [options] <name> [<age>]");
        assert_eq!(
            data.command.options,
            vec![OptionHelp {
                short: vec!["-i".into()],
                long: vec!["--int".into(), "--int-option".into()],
                help: String::new(),
            }]
        );
    }

    #[test]
    fn global_options_sorted_by_short_alias() {
        let app = sample();
        let data = HelpData::collect(&app, "contact").unwrap();
        let shorts: Vec<_> = data
            .global_options
            .iter()
            .map(|o| o.short.join(","))
            .collect();
        assert_eq!(shorts, vec!["", "-h", "-v"]);
    }

    #[test]
    fn groups_list_top_level_first() {
        let app = sample();
        let data = HelpData::collect(&app, "help").unwrap();
        let groups: Vec<_> = data.groups(None).into_keys().collect();
        assert_eq!(groups, vec!["", "config", "db"]);
        let db = &data.groups(Some("db"))["db"];
        assert_eq!(db[0].0, "db create");
        assert_eq!(db[1].0, "db drop");
    }

    #[test]
    fn help_for_command() {
        let mut app = sample();
        let mut ui = MockUI::new();
        assert_eq!(app.fire(Some("help contact"), &mut ui), 0);
        let out = ui.transcript();
        assert!(out.contains("contact [options] <name> [<age>]"));
        assert!(out.contains("The contact name"));
        assert!(out.contains("Global options:"));
        assert!(!out.contains("Available commands:"));
    }

    #[test]
    fn help_lists_commands() {
        let mut app = sample();
        let mut ui = MockUI::new();
        assert_eq!(app.fire(Some("--help"), &mut ui), 0);
        let out = ui.transcript();
        assert!(out.contains("Available commands:"));
        assert!(out.contains("db create"));
        assert!(out.contains("version"));
    }

    #[test]
    fn help_for_group_lists_only_group() {
        let mut app = sample();
        let mut ui = MockUI::new();
        assert_eq!(app.fire(Some("db"), &mut ui), 0);
        let out = ui.transcript();
        assert!(out.contains("db drop"));
        assert!(!out.contains("config show"));
        assert!(!out.contains("contact"));
    }

    #[test]
    fn help_for_unknown_command() {
        let mut app = sample();
        let mut ui = MockUI::new();
        assert_eq!(app.fire(Some("help nope"), &mut ui), 20);
        assert!(ui.has_error("Command \"nope\" not found."));
    }
}
