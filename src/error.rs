use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::value::ArgType;

/// Argument parsing error.
///
/// Every variant is terminal for the parse call that produced it: the first
/// problem found aborts the token walk and no partial result is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErr {
    /// A `--name` or `-x` token matched no registered option.
    #[error("unknown argument: {0}")]
    UnknownOption(String),

    /// A value-taking option was the last token, or was followed by another flag.
    #[error("argument {0} requires a value")]
    MissingValue(String),

    /// The raw text could not be coerced into the declared type.
    #[error("invalid value for {arg}: {source}")]
    InvalidValue {
        arg: String,
        #[source]
        source: ValueErr,
    },

    /// The supplied value is not a member of the declared choice set.
    #[error("invalid choice '{value}' for {arg} (choose from {})", .choices.join(", "))]
    InvalidChoice {
        arg: String,
        value: String,
        choices: Vec<String>,
    },

    /// A required option or positional was never supplied.
    #[error("required argument missing: {0}")]
    MissingRequired(String),

    /// A bare token arrived after every positional slot was filled.
    #[error("unrecognized positional argument: {0}")]
    UnrecognizedPositional(String),
}

/// Failure to coerce a raw token into a typed [`Value`](crate::Value).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueErr {
    #[error("'{value}' is not a valid integer")]
    Int {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("'{value}' is not a valid float")]
    Float {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("'{0}' is not a valid boolean")]
    Bool(String),

    #[error("invalid datetime format: '{0}'")]
    Timestamp(String),
}

/// Error raised while registering arguments or subcommands.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionErr {
    #[error("illegal blank argument name")]
    BlankName,

    #[error("illegal argument name '{0}'")]
    IllegalName(String),

    #[error("illegal short alias '{0}', expected a single alphanumeric character")]
    IllegalShort(String),

    #[error("duplicate argument name '{0}'")]
    DuplicateName(String),

    #[error("duplicate short alias '-{0}'")]
    DuplicateShort(char),

    #[error("duplicate command '{0}'")]
    DuplicateCommand(String),

    #[error("default value for '{name}' is {actual}, expected {expected}")]
    DefaultMismatch {
        name: String,
        expected: ArgType,
        actual: &'static str,
    },

    #[error("argument '{name}' of type {arg_type} cannot be positional")]
    IllegalPositional {
        name: String,
        arg_type: ArgType,
    },
}
