use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;

use crate::value::Value;

/// The key under which the selected subcommand's name is stored.
pub const SUBCOMMAND_KEY: &str = "subcommand";

/// The `CommandLine` is the result of a successful parse.
///
/// It maps each argument name (long name, or positional name) to a typed
/// [`Value`]. Arguments with a default are always present, supplied or not;
/// use [`CommandLine::is_supplied`] to tell an explicit value from a default.
///
/// The typed getters never fail. An absent name or a value of another kind
/// yields the zero value of the requested type: `""`, `0`, `0.0`, `false`,
/// an empty slice, or the Unix epoch at offset zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandLine {
    values: IndexMap<String, Value>,
    supplied: HashSet<String>,
    commands: Vec<String>,
}

impl CommandLine {
    pub(crate) fn new() -> CommandLine {
        CommandLine::default()
    }

    pub(crate) fn set_default(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
    }

    pub(crate) fn set_value(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
        self.supplied.insert(name.to_owned());
    }

    /// Fold a subcommand's result into this one, recording `name` as the selection.
    pub(crate) fn merge_subcommand(&mut self, name: &str, sub: CommandLine) {
        self.values.extend(sub.values);
        self.supplied.extend(sub.supplied);
        self.values.insert(SUBCOMMAND_KEY.to_owned(), Value::Text(name.to_owned()));
        self.commands = std::iter::once(name.to_owned()).chain(sub.commands).collect();
    }

    /// Get the raw typed value for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Check whether `name` has a value, from the command line or a default.
    pub fn has_value(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Check whether `name` was given explicitly on the command line.
    pub fn is_supplied(&self, name: &str) -> bool {
        self.supplied.contains(name)
    }

    /// The subcommand selected directly below the parser that produced this result.
    pub fn subcommand(&self) -> Option<&str> {
        self.commands.first().map(|s| s.as_str())
    }

    /// Every subcommand selected, outermost first.
    pub fn subcommand_path(&self) -> &[String] {
        &self.commands
    }

    /// Iterate over all values in the order they were first set.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_string(&self, name: &str) -> &str {
        self.get(name).and_then(Value::as_str).unwrap_or("")
    }

    /// Get an integer or counter value.
    pub fn get_int(&self, name: &str) -> i64 {
        self.get(name).and_then(Value::as_int).unwrap_or(0)
    }

    pub fn get_float(&self, name: &str) -> f64 {
        self.get(name).and_then(Value::as_float).unwrap_or(0.0)
    }

    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn get_list(&self, name: &str) -> &[String] {
        self.get(name).and_then(Value::as_list).unwrap_or(&[])
    }

    pub fn get_datetime(&self, name: &str) -> DateTime<FixedOffset> {
        self.get(name).and_then(Value::as_timestamp).unwrap_or_default()
    }
}
