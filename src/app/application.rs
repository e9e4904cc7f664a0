//! Application registry and execution lifecycle.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::rc::Rc;

use serde_yaml::Mapping;
use tracing::debug;

use crate::builtin::{HelpCommand, VersionCommand};
use crate::command::{tokens, Command, CommandResult, CommandSchema, Invocation};
use crate::config::Config;
use crate::error::{EmberError, Result};
use crate::field::{Field, Value};
use crate::shell::{self, ShellOptions, ShellResult};
use crate::template::Templates;
use crate::ui::{OutputMode, UserInterface};

const DEFAULT_VERSION: &str = "0.0.1 alpha";

struct Registered {
    command: Rc<dyn Command>,
    schema: CommandSchema,
}

/// What a command line resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A registered command, by dotted name.
    Command(String),
    /// A group prefix with no command of its own, e.g. `db` when only
    /// `db.create` and `db.drop` exist.
    Group(String),
}

/// Builder for [`Application`].
///
/// Every built-in is enabled unless switched off: the `verbose`, `no_ansi`
/// and `help` global options, and the `help` and `version` commands.
#[derive(Debug, Clone)]
pub struct ApplicationBuilder {
    name: String,
    version: String,
    context: Mapping,
    verbose_option: bool,
    ansi_option: bool,
    help_command: bool,
    version_command: bool,
    config_files: Vec<PathBuf>,
    config_create: bool,
    template_folder: Option<PathBuf>,
}

impl ApplicationBuilder {
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Free-form application data. Also used as the defaults of a newly
    /// created config file.
    pub fn context(mut self, context: Mapping) -> Self {
        self.context = context;
        self
    }

    pub fn verbose_option(mut self, enabled: bool) -> Self {
        self.verbose_option = enabled;
        self
    }

    pub fn ansi_option(mut self, enabled: bool) -> Self {
        self.ansi_option = enabled;
        self
    }

    pub fn help_command(mut self, enabled: bool) -> Self {
        self.help_command = enabled;
        self
    }

    pub fn version_command(mut self, enabled: bool) -> Self {
        self.version_command = enabled;
        self
    }

    /// Candidate config files; the first existing one is loaded.
    pub fn config_files<I, P>(mut self, files: I, create: bool) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config_files = files.into_iter().map(Into::into).collect();
        self.config_create = create;
        self
    }

    pub fn template_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.template_folder = Some(folder.into());
        self
    }

    /// Build the application.
    ///
    /// # Errors
    ///
    /// Fails when the config file cannot be read or created.
    pub fn build(self) -> Result<Application> {
        let config = Config::load(&self.config_files, self.config_create, &self.context)?;

        let mut app = Application {
            name: self.name,
            version: self.version,
            context: self.context,
            options: super::OptionTable::new(),
            commands: BTreeMap::new(),
            config,
            templates: self.template_folder.map(Templates::new),
        };

        if self.verbose_option {
            app.add_option(
                Field::option("verbose")
                    .default(false)
                    .alias("v")
                    .help("Verbose mode"),
            )?;
        }
        if self.ansi_option {
            app.add_option(
                Field::option("no_ansi")
                    .default(false)
                    .help("Disable colored output"),
            )?;
        }
        if self.help_command {
            app.add_option(
                Field::option("help")
                    .default(false)
                    .alias("h")
                    .help("Show help"),
            )?;
            app.add_command(HelpCommand)?;
        }
        if self.version_command {
            app.add_command(VersionCommand)?;
        }

        Ok(app)
    }
}

/// A command-line application.
pub struct Application {
    name: String,
    version: String,
    context: Mapping,
    options: super::OptionTable,
    commands: BTreeMap<String, Registered>,
    config: Option<Config>,
    templates: Option<Templates>,
}

impl Application {
    pub fn builder(name: impl Into<String>) -> ApplicationBuilder {
        ApplicationBuilder {
            name: name.into(),
            version: DEFAULT_VERSION.to_string(),
            context: Mapping::new(),
            verbose_option: true,
            ansi_option: true,
            help_command: true,
            version_command: true,
            config_files: Vec::new(),
            config_create: false,
            template_folder: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn context(&self) -> &Mapping {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Mapping {
        &mut self.context
    }

    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    pub fn config_mut(&mut self) -> Option<&mut Config> {
        self.config.as_mut()
    }

    pub fn templates(&self) -> Option<&Templates> {
        self.templates.as_ref()
    }

    // --- Global options ---

    /// Register a global option.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when one of its aliases is already taken.
    pub fn add_option(&mut self, field: Field) -> Result<()> {
        self.options.add(field)
    }

    /// Set a global option by name or alias. Returns `false` when unknown.
    pub fn set_option(&mut self, name: &str, value: impl Into<Value>) -> bool {
        self.options.set(name, value.into())
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Boolean global option; `false` when unset or unknown.
    pub fn option_flag(&self, name: &str) -> bool {
        self.options.flag(name)
    }

    pub fn options(&self) -> &super::OptionTable {
        &self.options
    }

    // --- Command registry ---

    /// Register a command, replacing any command with the same name.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when the command has no name or its fields
    /// collide.
    pub fn add_command<C: Command + 'static>(&mut self, command: C) -> Result<()> {
        let name = command.name().to_string();
        if name.is_empty() {
            return Err(EmberError::configuration(
                "The command has no name, please implement Command::name",
            ));
        }
        let schema = CommandSchema::new(command.fields())?;
        debug!("Register command \"{}\"", name);
        self.commands.insert(
            name,
            Registered {
                command: Rc::new(command),
                schema,
            },
        );
        Ok(())
    }

    pub fn add_commands<C, I>(&mut self, commands: I) -> Result<()>
    where
        C: Command + 'static,
        I: IntoIterator<Item = C>,
    {
        for command in commands {
            self.add_command(command)?;
        }
        Ok(())
    }

    /// Registered commands, sorted by dotted name.
    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.values().map(|r| r.command.as_ref())
    }

    pub fn command(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|r| r.command.as_ref())
    }

    pub fn schema(&self, name: &str) -> Option<&CommandSchema> {
        self.commands.get(name).map(|r| &r.schema)
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    // --- Resolution ---

    /// Rewrite a help request (`--help`, `-h`, or no command name at all)
    /// into a call to the `help` command.
    fn prepare_tokens(&self, mut tokens: Vec<String>) -> Vec<String> {
        if !self.has_command("help") || tokens.iter().any(|t| t == "help") {
            return tokens;
        }
        let no_name = tokens.iter().all(|t| tokens::is_option(t));
        let before = tokens.len();
        tokens.retain(|t| t != "--help" && t != "-h");
        if no_name || tokens.len() != before {
            tokens.insert(0, "help".to_string());
        }
        tokens
    }

    /// Resolve command tokens to a command or a group.
    ///
    /// The non-option tokens are candidate name segments; the longest
    /// prefix naming a registered command wins. Failing that, a prefix of a
    /// registered dotted name resolves to its group, as long as a `help`
    /// command exists to list it.
    ///
    /// # Errors
    ///
    /// `NoCommandProvided` when there are no name segments,
    /// `CommandNotFound` when nothing matches.
    pub fn resolve(&self, tokens: &[String]) -> Result<Resolution> {
        let parts: Vec<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|t| !tokens::is_option(t))
            .collect();
        if parts.is_empty() {
            return Err(EmberError::NoCommandProvided);
        }

        for len in (1..=parts.len()).rev() {
            let name = parts[..len].join(".");
            if self.commands.contains_key(&name) {
                return Ok(Resolution::Command(name));
            }
        }

        if self.has_command("help") {
            for len in (1..=parts.len()).rev() {
                let prefix = parts[..len].join(".");
                let group = format!("{}.", prefix);
                if self.commands.keys().any(|name| name.starts_with(&group)) {
                    return Ok(Resolution::Group(prefix));
                }
            }
        }

        Err(EmberError::CommandNotFound {
            name: parts[0].to_string(),
        })
    }

    /// Create the invocation a command line resolves to, without parsing it.
    pub fn get_command(&self, command_line: &str) -> Result<Invocation> {
        let tokens = self.prepare_tokens(tokens::split(command_line)?);
        self.invocation(tokens)
    }

    fn invocation(&self, tokens: Vec<String>) -> Result<Invocation> {
        let (name, tokens) = match self.resolve(&tokens)? {
            Resolution::Command(name) => (name, tokens),
            Resolution::Group(prefix) => {
                debug!("Command group \"{}\", showing help", prefix);
                let mut tokens = tokens;
                tokens.insert(0, "help".to_string());
                ("help".to_string(), tokens)
            }
        };
        let schema = self
            .schema(&name)
            .cloned()
            .ok_or_else(|| EmberError::CommandNotFound { name: name.clone() })?;
        Ok(Invocation::new(name, schema, tokens))
    }

    // --- Execution ---

    /// Run a command line and return the command's result.
    ///
    /// Unlike [`fire`](Self::fire), errors are returned, not reported.
    pub fn launch(
        &mut self,
        command_line: &str,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let tokens = self.prepare_tokens(tokens::split(command_line)?);
        self.apply_reserved_flags(&tokens);
        if self.option_flag("verbose") {
            ui.set_output_mode(OutputMode::Verbose);
        }
        if self.option_flag("no_ansi") {
            ui.set_ansi(false);
        }

        let mut invocation = self.invocation(tokens)?;
        let command = self
            .commands
            .get(invocation.name())
            .map(|r| Rc::clone(&r.command))
            .ok_or_else(|| EmberError::CommandNotFound {
                name: invocation.name().to_string(),
            })?;

        debug!("Launch command \"{}\"", invocation.name());
        invocation.parse(&mut self.options)?;
        invocation.validate()?;
        command.init(&mut invocation, self, ui)?;
        command.run(&invocation, self, ui)
    }

    /// Run a command line and return the process exit code.
    ///
    /// Without a command line, the process arguments are used. Errors are
    /// shown through `ui` as a single line.
    pub fn fire(&mut self, command_line: Option<&str>, ui: &mut dyn UserInterface) -> i32 {
        let result = match command_line {
            Some(line) => self.launch(line, ui),
            None => match process_line() {
                Ok(line) => self.launch(&line, ui),
                Err(e) => Err(e),
            },
        };

        match result {
            Ok(result) => result.exit_code,
            Err(e) => {
                debug!("Command failed: {:?}", e);
                ui.error(&e.to_string());
                e.exit_code()
            }
        }
    }

    fn apply_reserved_flags(&mut self, tokens: &[String]) {
        for token in tokens {
            match token.as_str() {
                "-v" | "--verbose" => {
                    self.options.set("verbose", Value::Bool(true));
                }
                "--no-ansi" => {
                    self.options.set("no_ansi", Value::Bool(true));
                }
                _ => {}
            }
        }
    }

    /// Run a shell command; see [`shell::run`].
    pub fn shell(&self, command: &str, options: &ShellOptions) -> Result<ShellResult> {
        shell::run(command, options)
    }
}

/// The process arguments, re-joined into one command line.
///
/// # Errors
///
/// `InvalidCommandLine` when an argument is not valid UTF-8.
fn process_line() -> Result<String> {
    let args = env::args_os()
        .skip(1)
        .map(|arg| {
            arg.into_string().map_err(|arg| EmberError::InvalidCommandLine {
                line: arg.to_string_lossy().into_owned(),
            })
        })
        .collect::<Result<Vec<String>>>()?;
    debug!("Process arguments: {:?}", args);
    tokens::join(&args)
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::FnCommand;
    use crate::ui::MockUI;

    fn noop(name: &str) -> FnCommand {
        FnCommand::new(name, |_, _, _| Ok(CommandResult::success()))
    }

    fn app_with(names: &[&str]) -> Application {
        let mut app = Application::builder("sample").build().unwrap();
        for name in names {
            app.add_command(noop(name)).unwrap();
        }
        app
    }

    fn split(line: &str) -> Vec<String> {
        tokens::split(line).unwrap()
    }

    #[test]
    fn builtins_are_registered() {
        let app = app_with(&[]);
        assert!(app.has_command("help"));
        assert!(app.has_command("version"));
        assert!(app.options().contains("verbose"));
        assert!(app.options().contains("-v"));
        assert!(app.options().contains("no_ansi"));
        assert!(app.options().contains("-h"));
        assert_eq!(app.version(), DEFAULT_VERSION);
    }

    #[test]
    fn builtins_can_be_disabled() {
        let app = Application::builder("bare")
            .verbose_option(false)
            .ansi_option(false)
            .help_command(false)
            .version_command(false)
            .build()
            .unwrap();
        assert_eq!(app.commands().count(), 0);
        assert!(app.options().is_empty());
    }

    #[test]
    fn longest_dotted_match_wins() {
        let app = app_with(&["a", "a.b", "a.b.c"]);
        assert_eq!(
            app.resolve(&split("a b c extra")).unwrap(),
            Resolution::Command("a.b.c".into())
        );
        assert_eq!(
            app.resolve(&split("a b x")).unwrap(),
            Resolution::Command("a.b".into())
        );
    }

    #[test]
    fn group_prefix_resolves_to_group() {
        let app = app_with(&["a.b"]);
        assert_eq!(
            app.resolve(&split("a")).unwrap(),
            Resolution::Group("a".into())
        );
        let inv = app.get_command("a").unwrap();
        assert_eq!(inv.name(), "help");
        assert_eq!(inv.tokens(), &["help".to_string(), "a".to_string()]);
    }

    #[test]
    fn group_needs_help_command() {
        let mut app = Application::builder("bare")
            .help_command(false)
            .build()
            .unwrap();
        app.add_command(noop("a.b")).unwrap();
        assert!(matches!(
            app.resolve(&split("a")),
            Err(EmberError::CommandNotFound { .. })
        ));
    }

    #[test]
    fn not_found_names_first_token() {
        let app = app_with(&["contact"]);
        let err = app.resolve(&split("nope extra")).unwrap_err();
        assert_eq!(err.to_string(), "Command \"nope\" not found.");
    }

    #[test]
    fn no_name_segments() {
        let app = app_with(&[]);
        assert!(matches!(
            app.resolve(&split("--verbose")),
            Err(EmberError::NoCommandProvided)
        ));
    }

    #[test]
    fn help_flag_is_rewritten() {
        let app = app_with(&["contact"]);
        let inv = app.get_command("contact --help").unwrap();
        assert_eq!(inv.name(), "help");
        assert_eq!(inv.tokens(), &["help".to_string(), "contact".to_string()]);

        let inv = app.get_command("").unwrap();
        assert_eq!(inv.name(), "help");
    }

    #[test]
    fn help_flag_without_help_command_is_kept() {
        let mut app = Application::builder("bare")
            .help_command(false)
            .build()
            .unwrap();
        app.add_command(noop("contact")).unwrap();
        let inv = app.get_command("contact -h").unwrap();
        assert_eq!(inv.name(), "contact");
    }

    #[test]
    fn unnamed_command_is_rejected() {
        let mut app = app_with(&[]);
        assert!(matches!(
            app.add_command(noop("")),
            Err(EmberError::Configuration { .. })
        ));
    }

    #[test]
    fn re_registering_replaces() {
        let mut app = app_with(&[]);
        app.add_command(
            FnCommand::new("version", |_, _, ui| {
                ui.info("custom");
                Ok(CommandResult::success())
            }),
        )
        .unwrap();
        let mut ui = MockUI::new();
        assert_eq!(app.fire(Some("version"), &mut ui), 0);
        assert!(ui.has_info("custom"));
    }

    #[test]
    fn reserved_flags_configure_ui() {
        let mut app = app_with(&["noop"]);
        let mut ui = MockUI::new();
        assert_eq!(app.fire(Some("noop -v --no-ansi"), &mut ui), 0);
        assert!(app.option_flag("verbose"));
        assert!(app.option_flag("no_ansi"));
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
        assert!(!ui.ansi());
    }

    #[test]
    fn explicit_result_code_passes_through() {
        let mut app = app_with(&[]);
        app.add_command(FnCommand::new("fail", |_, _, _| Ok(CommandResult::failure(3))))
            .unwrap();
        let mut ui = MockUI::new();
        assert_eq!(app.fire(Some("fail"), &mut ui), 3);
    }
}
