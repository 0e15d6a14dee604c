use std::env;
use std::io::stderr;
use std::process::exit;

use indexmap::IndexMap;
use tracing::debug;

use crate::cmd::CommandLine;
use crate::error::{OptionErr, ParseErr};
use crate::format::HelpFormatter;
use crate::matcher::Matcher;
use crate::option::{ArgConfig, Argument};
use crate::util::OptionValidator;
use crate::value::ArgType;

/// The version reported by a parser that never had one set.
pub const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) const HELP: &str = "help";
pub(crate) const VERSION: &str = "version";

/// The successful result of a parse call.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Every token was matched and all constraints hold.
    Matches(CommandLine),
    /// `--help` was requested; holds the rendered help of the parser it was given to.
    Help(String),
    /// `--version` was requested; holds the `"<name> <version>"` line.
    Version(String),
}

impl ParseOutcome {
    /// Get the [`CommandLine`], or [`None`] for a help or version request.
    pub fn into_matches(self) -> Option<CommandLine> {
        match self {
            ParseOutcome::Matches(cmd) => Some(cmd),
            _ => None,
        }
    }
}

/// The `Parser` is the definition registry of one command.
///
/// It owns the optional and positional [`Argument`]s and any number of named
/// child parsers (subcommands). A `Parser` keeps no state between parse calls:
/// every call works on a fresh context, so one registry may be parsed against
/// repeatedly, or from several threads at once.
///
/// # Examples
///
/// ```
/// use argparse::{ArgConfig, Parser};
///
/// let mut parser = Parser::new("server", "A tiny server");
/// parser.add_help().unwrap()
///     .add_int("p", "port", ArgConfig::new().desc("port to listen on").default_value(8080)).unwrap()
///     .add_bool("v", "verbose", ArgConfig::new().desc("log every request")).unwrap()
///     .add_positional("root", ArgConfig::new().desc("directory to serve").required(true)).unwrap();
///
/// let cmd = parser.parse_args(&["-vp9000", "/srv/www"]).unwrap().into_matches().unwrap();
/// assert_eq!(9000, cmd.get_int("port"));
/// assert!(cmd.get_bool("verbose"));
/// assert_eq!("/srv/www", cmd.get_string("root"));
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    name: String,
    description: String,
    epilog: Option<String>,
    version: String,
    options: Vec<Argument>,
    positionals: Vec<Argument>,
    commands: IndexMap<String, Parser>,
    parent: Option<String>,
    formatter: HelpFormatter,
}

impl Parser {
    /// Create a named, described parser.
    pub fn new(name: &str, description: &str) -> Parser {
        Parser {
            name: name.to_owned(),
            description: description.to_owned(),
            epilog: None,
            version: DEFAULT_VERSION.to_owned(),
            options: Vec::new(),
            positionals: Vec::new(),
            commands: IndexMap::new(),
            parent: None,
            formatter: HelpFormatter::new(),
        }
    }

    /// Set the text printed after the help message.
    pub fn set_epilog(&mut self, epilog: &str) -> &mut Self {
        self.epilog = Some(epilog.to_owned());
        self
    }

    /// Set the version printed by `--version`.
    ///
    /// Subcommands registered afterwards inherit it.
    pub fn set_version(&mut self, version: &str) -> &mut Self {
        self.version = version.to_owned();
        self
    }

    /// Replace the formatter used to render this parser's help.
    pub fn set_formatter(&mut self, formatter: HelpFormatter) -> &mut Self {
        self.formatter = formatter;
        self
    }

    /// Register `-h, --help`.
    pub fn add_help(&mut self) -> Result<&mut Self, OptionErr> {
        self.add_bool("h", HELP, ArgConfig::new().desc("Show this help message and exit"))
    }

    /// Register `-V, --version`.
    pub fn add_version(&mut self) -> Result<&mut Self, OptionErr> {
        self.add_bool("V", VERSION, ArgConfig::new().desc("Show program's version and exit"))
    }

    /// Register an optional argument of any type.
    ///
    /// `short` is a single character alias, or empty for none. `long` is the
    /// canonical name the value is stored under.
    ///
    /// # Error
    ///
    /// Returns an error if a name is malformed, already registered, or the
    /// configured default does not fit `arg_type`.
    pub fn add_option(&mut self, short: &str, long: &str, arg_type: ArgType, config: ArgConfig) -> Result<&mut Self, OptionErr> {
        let option = Argument::option(short, long, arg_type, config)?;

        self.check_unique_name(option.get_name())?;
        if let Some(c) = option.get_short() {
            if self.find_short(c).is_some() {
                return Err(OptionErr::DuplicateShort(c));
            }
        }

        self.options.push(option);
        Ok(self)
    }

    pub fn add_string(&mut self, short: &str, long: &str, config: ArgConfig) -> Result<&mut Self, OptionErr> {
        self.add_option(short, long, ArgType::Text, config)
    }

    pub fn add_int(&mut self, short: &str, long: &str, config: ArgConfig) -> Result<&mut Self, OptionErr> {
        self.add_option(short, long, ArgType::Int, config)
    }

    pub fn add_float(&mut self, short: &str, long: &str, config: ArgConfig) -> Result<&mut Self, OptionErr> {
        self.add_option(short, long, ArgType::Float, config)
    }

    /// Register a boolean flag. It defaults to `false` unless configured otherwise.
    pub fn add_bool(&mut self, short: &str, long: &str, config: ArgConfig) -> Result<&mut Self, OptionErr> {
        self.add_option(short, long, ArgType::Bool, config)
    }

    /// Register a comma separated list. It defaults to an empty list.
    pub fn add_list(&mut self, short: &str, long: &str, config: ArgConfig) -> Result<&mut Self, OptionErr> {
        self.add_option(short, long, ArgType::List, config)
    }

    /// Register a counter, incremented once per occurrence. It defaults to `0`.
    pub fn add_counter(&mut self, short: &str, long: &str, config: ArgConfig) -> Result<&mut Self, OptionErr> {
        self.add_option(short, long, ArgType::Counter, config)
    }

    pub fn add_datetime(&mut self, short: &str, long: &str, config: ArgConfig) -> Result<&mut Self, OptionErr> {
        self.add_option(short, long, ArgType::Timestamp, config)
    }

    /// Register a text positional argument.
    ///
    /// Positionals are filled in registration order.
    pub fn add_positional(&mut self, name: &str, config: ArgConfig) -> Result<&mut Self, OptionErr> {
        self.add_positional_typed(name, ArgType::Text, config)
    }

    /// Register a positional argument coerced to `arg_type`. Counters are rejected.
    pub fn add_positional_typed(&mut self, name: &str, arg_type: ArgType, config: ArgConfig) -> Result<&mut Self, OptionErr> {
        let positional = Argument::positional(name, arg_type, config)?;
        self.check_unique_name(positional.get_name())?;
        self.positionals.push(positional);
        Ok(self)
    }

    /// Register a subcommand and return its parser for configuration.
    ///
    /// The child inherits this parser's version and reports itself as
    /// `"<parent> <name>"` in usage and version output.
    pub fn add_command(&mut self, name: &str, description: &str) -> Result<&mut Parser, OptionErr> {
        OptionValidator::validate_name(name)?;
        if self.commands.contains_key(name) {
            return Err(OptionErr::DuplicateCommand(name.to_owned()));
        }

        let mut child = Parser::new(name, description);
        child.version = self.version.clone();
        child.parent = Some(self.get_full_name());
        child.formatter = self.formatter.clone();

        Ok(self.commands.entry(name.to_owned()).or_insert(child))
    }

    fn check_unique_name(&self, name: &str) -> Result<(), OptionErr> {
        if self.find_long(name).is_some() || self.positionals.iter().any(|p| p.get_name() == name) {
            return Err(OptionErr::DuplicateName(name.to_owned()));
        }
        Ok(())
    }

    pub(crate) fn find_long(&self, name: &str) -> Option<(usize, &Argument)> {
        self.options.iter().enumerate().find(|(_, o)| o.get_name() == name)
    }

    pub(crate) fn find_short(&self, short: char) -> Option<(usize, &Argument)> {
        self.options.iter().enumerate().find(|(_, o)| o.get_short() == Some(short))
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// The name including every parent command, e.g. `taskmgr add`.
    pub fn get_full_name(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{} {}", parent, self.name),
            None => self.name.clone(),
        }
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn get_epilog(&self) -> Option<&str> {
        self.epilog.as_deref()
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }

    pub fn get_formatter(&self) -> &HelpFormatter {
        &self.formatter
    }

    /// Get the optional arguments in registration order.
    pub fn get_options(&self) -> &[Argument] {
        &self.options
    }

    /// Get the positional arguments in matching order.
    pub fn get_positionals(&self) -> &[Argument] {
        &self.positionals
    }

    /// Get the subcommands in registration order.
    pub fn get_commands(&self) -> impl Iterator<Item = &Parser> {
        self.commands.values()
    }

    pub fn get_command(&self, name: &str) -> Option<&Parser> {
        self.commands.get(name)
    }

    pub fn get_command_mut(&mut self, name: &str) -> Option<&mut Parser> {
        self.commands.get_mut(name)
    }

    pub fn has_commands(&self) -> bool {
        !self.commands.is_empty()
    }

    /// Render the help message with this parser's formatter.
    pub fn render_help(&self) -> String {
        self.formatter.render_help(self)
    }

    /// The line printed for `--version`.
    pub fn version_line(&self) -> String {
        format!("{} {}", self.get_full_name(), self.version)
    }

    /// Parse the process arguments, without the program name.
    ///
    /// Also see [`Self::parse_args`], [`Self::parse_or_exit`]
    pub fn parse(&self) -> Result<ParseOutcome, ParseErr> {
        self.parse_args(&env::args().skip(1).collect::<Vec<String>>())
    }

    /// Parse `arguments` against this registry.
    ///
    /// The first token is checked against the subcommands; on a match the
    /// remaining tokens are parsed by that subcommand alone. A help or version
    /// request short-circuits before required arguments and choices are
    /// validated.
    ///
    /// # Error
    ///
    /// The first problem found is returned as [`ParseErr`]; no partial
    /// result is produced.
    ///
    /// Also see [`Self::parse`], [`Self::parse_args_or_exit`]
    pub fn parse_args<T: AsRef<str>>(&self, arguments: &[T]) -> Result<ParseOutcome, ParseErr> {
        let tokens: Vec<&str> = arguments.iter().map(|a| a.as_ref()).collect();
        Matcher::new(self, &tokens).run()
    }

    /// Parse the process arguments or exit.
    ///
    /// Also see [`Self::parse_args_or_exit`].
    pub fn parse_or_exit(&self) -> CommandLine {
        self.parse_args_or_exit(&env::args().skip(1).collect::<Vec<String>>())
    }

    /// Parse `arguments`, handling everything but a successful match by exiting.
    ///
    /// Help and version output go to stdout with exit status 0. A parse error
    /// is printed to stderr followed by the help message, with exit status 1.
    pub fn parse_args_or_exit<T: AsRef<str>>(&self, arguments: &[T]) -> CommandLine {
        match self.parse_args(arguments) {
            Ok(ParseOutcome::Matches(cmd)) => cmd,
            Ok(ParseOutcome::Help(help)) => {
                print!("{}", help);
                exit(0);
            }
            Ok(ParseOutcome::Version(line)) => {
                println!("{}", line);
                exit(0);
            }
            Err(err) => {
                debug!(parser = %self.name, error = %err, "parse failed, exiting");
                eprintln!("Error: {}", err);
                eprintln!();
                if let Err(err) = self.formatter.print_help(&mut stderr(), self) {
                    debug!(error = %err, "failed to print help");
                }
                exit(1);
            }
        }
    }
}
