//! Ember demo CLI entry point.

use std::process::ExitCode;

use ember::app::Application;
use ember::command::{Command, CommandResult, FnCommand, Invocation};
use ember::field::Field;
use ember::shell::ShellOptions;
use ember::ui::{create_ui, OutputMode, UserInterface};
use ember::{EmberError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `-v`/`--verbose` sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ember=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ember=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// `contact <name> [<age>]`
struct Contact;

impl Command for Contact {
    fn name(&self) -> &str {
        "contact"
    }

    fn description(&self) -> &str {
        "Show a contact card"
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::argument("name", 1).help("Contact name"),
            Field::argument("age", 2).default(18).help("Contact age"),
            Field::option("email")
                .default("")
                .alias("e")
                .help("Contact email"),
            Field::option("tags")
                .default(Vec::<String>::new())
                .alias("t")
                .help("Comma separated tags"),
        ]
    }

    fn init(
        &self,
        args: &mut Invocation,
        _app: &mut Application,
        _ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let adult = args.int("age").unwrap_or_default() >= 18;
        args.add_field(Field::option("adult").default(adult))
    }

    fn run(
        &self,
        args: &Invocation,
        _app: &mut Application,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let name = args.string("name").unwrap_or_default();
        let age = args.int("age").unwrap_or_default();
        ui.info(&format!("Contact {} with {} years old", name, age));

        let email = args.string("email").unwrap_or_default();
        if !email.is_empty() {
            ui.message(&format!("  email: {}", email));
        }
        if let Some(tags) = args.list("tags").filter(|t| !t.is_empty()) {
            ui.message(&format!("  tags: {}", tags.join(", ")));
        }
        if !args.flag("adult") {
            ui.warning(&format!("{} is under age", name));
        }
        Ok(CommandResult::success())
    }
}

fn greet() -> FnCommand {
    FnCommand::new("greet", |args, _app, ui| {
        let name = args.string("name").unwrap_or("World");
        let end = args.string("end_char").unwrap_or("!");
        ui.success(&format!("Hello {}{}", name, end));
        Ok(CommandResult::success())
    })
    .description("Greets the user")
    .argument("name", |f| f.default("World").help("Name to greet"))
    .option("end_char", |f| f.default("!").help("Character to end with"))
}

fn whoami() -> FnCommand {
    FnCommand::new("whoami", |_args, app, ui| {
        let mut status = ui.start_status("Asking the system");
        let result = app.shell("whoami", &ShellOptions::default())?;
        if !result.success() {
            status.finish_error("whoami failed");
            return Ok(CommandResult::failure(result.exit_code.unwrap_or(1)));
        }
        status.stop();
        ui.info(result.stdout.trim());
        Ok(CommandResult::success())
    })
    .description("Show the current user")
}

fn db_create() -> FnCommand {
    FnCommand::new("db.create", |args, _app, ui| {
        let name = args.string("db_name").unwrap_or_default();
        let owner = args.string("owner").unwrap_or_default();
        ui.debug(&format!("Creating \"{}\" for \"{}\"", name, owner));
        ui.success(&format!("Database {} created", name));
        Ok(CommandResult::success())
    })
    .description("Create a database")
    .argument("db_name", |f| f.help("Database name"))
    .option("owner", |f| f.default("postgres").help("Database owner"))
}

fn db_drop() -> FnCommand {
    FnCommand::new("db.drop", |args, _app, ui| {
        let name = args.string("db_name").unwrap_or_default();
        if !args.flag("force") && ui.ask(&format!("Drop {}?", name), &["y", "n"])? != "y" {
            ui.warning("Cancelled");
            return Ok(CommandResult::failure(1));
        }
        ui.success(&format!("Database {} dropped", name));
        Ok(CommandResult::success())
    })
    .description("Drop a database")
    .argument("db_name", |f| f.help("Database name"))
    .option("force", |f| f.default(false).help("Do not ask for confirmation"))
}

fn config_get() -> FnCommand {
    FnCommand::new("config.get", |args, app, ui| {
        let key = args.string("key").unwrap_or_default();
        let config = app
            .config()
            .ok_or_else(|| EmberError::command("No config file"))?;
        match config.get(key) {
            Some(value) => {
                let text = serde_yaml::to_string(value).map_err(anyhow::Error::from)?;
                ui.message(text.trim_end());
                Ok(CommandResult::success())
            }
            None => Err(EmberError::command(format!("Key \"{}\" not set", key))),
        }
    })
    .description("Show a config value")
    .argument("key", |f| f.help("Dotted key"))
}

fn config_set() -> FnCommand {
    FnCommand::new("config.set", |args, app, ui| {
        let key = args.string("key").unwrap_or_default();
        let value = args.string("value").unwrap_or_default();
        let config = app
            .config_mut()
            .ok_or_else(|| EmberError::command("No config file"))?;
        config.set(key, value)?;
        config.write()?;
        ui.success(&format!("{} = {}", key, value));
        Ok(CommandResult::success())
    })
    .description("Change a config value")
    .argument("key", |f| f.help("Dotted key"))
    .argument("value", |f| f.help("New value"))
}

fn build_app() -> Result<Application> {
    let mut app = Application::builder("ember")
        .version(env!("CARGO_PKG_VERSION"))
        .config_files(["~/.config/ember/config.yml"], false)
        .build()?;

    app.add_command(Contact)?;
    app.add_commands([greet(), whoami(), db_create(), db_drop(), config_get(), config_set()])?;
    Ok(app)
}

fn main() -> ExitCode {
    let verbose = std::env::args_os()
        .skip(1)
        .any(|a| a == "-v" || a == "--verbose");
    init_tracing(verbose);

    tracing::debug!(
        "Ember starting with args: {:?}",
        std::env::args_os().collect::<Vec<_>>()
    );

    let mut ui = create_ui(OutputMode::Normal);
    let mut app = match build_app() {
        Ok(app) => app,
        Err(e) => {
            ui.error(&e.to_string());
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1));
        }
    };

    let code = app.fire(None, ui.as_mut());
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
