use crate::error::OptionErr;

pub struct Util;

impl Util {
    /// Split the body of a long option into its name and the inline value after `=`.
    pub fn split_inline_value(body: &str) -> (&str, Option<&str>) {
        match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        }
    }

    /// The name an option is reported under in error messages, e.g. `--title/-t`.
    pub fn option_display_name(long: &str, short: Option<char>) -> String {
        match short {
            Some(c) => format!("--{}/-{}", long, c),
            None => format!("--{}", long),
        }
    }
}

pub struct OptionValidator;

impl OptionValidator {
    fn is_valid_short(c: char) -> bool {
        c.is_ascii_alphanumeric()
    }

    /// Validate a long option, positional or subcommand name.
    pub fn validate_name(name: &str) -> Result<(), OptionErr> {
        if name.is_empty() {
            return Err(OptionErr::BlankName);
        }
        if name.starts_with('-') || name.contains('=') || name.chars().any(char::is_whitespace) {
            return Err(OptionErr::IllegalName(name.to_owned()));
        }
        Ok(())
    }

    /// Validate a short alias. An empty alias means the option has none.
    pub fn validate_short(short: &str) -> Result<Option<char>, OptionErr> {
        let mut chars = short.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(None),
            (Some(c), None) if Self::is_valid_short(c) => Ok(Some(c)),
            _ => Err(OptionErr::IllegalShort(short.to_owned())),
        }
    }
}
