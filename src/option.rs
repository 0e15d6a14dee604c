use crate::error::OptionErr;
use crate::util::{OptionValidator, Util};
use crate::value::{ArgType, Value};

/// The configuration bundle shared by every argument registration method.
///
/// # Examples
///
/// ```
/// use argparse::ArgConfig;
///
/// let config = ArgConfig::new()
///     .desc("Sort order")
///     .default_value("priority")
///     .choices(["priority", "date", "title"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArgConfig {
    description: String,
    required: bool,
    default: Option<Value>,
    choices: Vec<String>,
}

impl ArgConfig {
    /// Create an empty configuration: no description, optional, no default, no choices.
    pub fn new() -> ArgConfig {
        ArgConfig::default()
    }

    /// Set the description shown in help output.
    pub fn desc(mut self, description: &str) -> Self {
        self.description = description.trim().to_owned();
        self
    }

    /// Whether the argument must be supplied on the command line.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the value used when the argument is not supplied.
    ///
    /// The value must fit the declared type; this is checked at registration.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Restrict the supplied value to a set of allowed texts.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }
}

/// The `Argument` is the declared shape of one recognized input.
///
/// Optional arguments are matched by `--long` name or `-s` alias; positional
/// arguments are matched by order among bare tokens. An `Argument` holds no
/// parse state, so a registry can be parsed against any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    name: String,
    short: Option<char>,
    description: String,
    required: bool,
    arg_type: ArgType,
    default: Option<Value>,
    choices: Vec<String>,
    positional: bool,
}

impl Argument {
    pub(crate) fn option(short: &str, long: &str, arg_type: ArgType, config: ArgConfig) -> Result<Argument, OptionErr> {
        OptionValidator::validate_name(long)?;
        let short = OptionValidator::validate_short(short)?;
        Self::build(long, short, arg_type, config, false)
    }

    pub(crate) fn positional(name: &str, arg_type: ArgType, config: ArgConfig) -> Result<Argument, OptionErr> {
        OptionValidator::validate_name(name)?;
        if arg_type == ArgType::Counter {
            return Err(OptionErr::IllegalPositional { name: name.to_owned(), arg_type });
        }
        Self::build(name, None, arg_type, config, true)
    }

    fn build(
        name: &str,
        short: Option<char>,
        arg_type: ArgType,
        config: ArgConfig,
        positional: bool,
    ) -> Result<Argument, OptionErr> {
        let default = match config.default {
            Some(value) => Some(arg_type.fit_default(value).map_err(|actual| OptionErr::DefaultMismatch {
                name: name.to_owned(),
                expected: arg_type,
                actual,
            })?),
            None => arg_type.implicit_default(),
        };

        Ok(Argument {
            name: name.to_owned(),
            short,
            description: config.description,
            required: config.required,
            arg_type,
            default,
            choices: config.choices,
            positional,
        })
    }

    /// The long name for options, or the positional name. Also the result key.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_short(&self) -> Option<char> {
        self.short
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn get_type(&self) -> ArgType {
        self.arg_type
    }

    pub fn get_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn get_choices(&self) -> &[String] {
        &self.choices
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_positional(&self) -> bool {
        self.positional
    }

    /// Check a raw value against the choice set. Always true without choices.
    pub fn accepts_choice(&self, raw: &str) -> bool {
        self.choices.is_empty() || self.choices.iter().any(|c| c == raw)
    }

    /// The name used to report this argument, `--long/-s` for options.
    pub fn display_name(&self) -> String {
        if self.positional {
            self.name.clone()
        } else {
            Util::option_display_name(&self.name, self.short)
        }
    }
}
