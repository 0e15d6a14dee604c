use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::ValueErr;

/// Layouts tried in order when coercing a timestamp. The first match wins.
const DATE_LAYOUT: &str = "%Y-%m-%d";
const DATETIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";
const US_DATE_LAYOUT: &str = "%m/%d/%Y";
const US_DATETIME_LAYOUT: &str = "%m/%d/%Y %H:%M:%S";

/// The declared type of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    Text,
    Int,
    Float,
    Bool,
    List,
    /// Counts occurrences of the flag, stored as [`Value::Int`].
    Counter,
    Timestamp,
}

impl ArgType {
    /// Whether an option of this type consumes a value token.
    ///
    /// Booleans and counters are satisfied by the flag's presence alone.
    pub fn takes_value(self) -> bool {
        !matches!(self, ArgType::Bool | ArgType::Counter)
    }

    /// The placeholder shown after a value-taking option in help output.
    pub fn metavar(self) -> &'static str {
        match self {
            ArgType::Text => "TEXT",
            ArgType::Int | ArgType::Counter => "INT",
            ArgType::Float => "FLOAT",
            ArgType::Bool => "BOOL",
            ArgType::List => "LIST",
            ArgType::Timestamp => "DATETIME",
        }
    }

    /// Convert a raw token into a typed [`Value`].
    ///
    /// Counters never reach this path from the command line; if called
    /// directly the token is read as an integer.
    pub fn coerce(self, raw: &str) -> Result<Value, ValueErr> {
        match self {
            ArgType::Text => Ok(Value::Text(raw.to_owned())),
            ArgType::Int | ArgType::Counter => raw.parse::<i64>()
                .map(Value::Int)
                .map_err(|source| ValueErr::Int { value: raw.to_owned(), source }),
            ArgType::Float => raw.parse::<f64>()
                .map(Value::Float)
                .map_err(|source| ValueErr::Float { value: raw.to_owned(), source }),
            ArgType::Bool => parse_bool(raw).map(Value::Bool),
            ArgType::List => Ok(Value::List(raw.split(',').map(|s| s.to_owned()).collect())),
            ArgType::Timestamp => parse_timestamp(raw).map(Value::Timestamp),
        }
    }

    /// The value seeded for a definition registered without a default.
    pub(crate) fn implicit_default(self) -> Option<Value> {
        match self {
            ArgType::Bool => Some(Value::Bool(false)),
            ArgType::Counter => Some(Value::Int(0)),
            ArgType::List => Some(Value::List(Vec::new())),
            _ => None,
        }
    }

    /// Check a configured default against this type, widening integers for floats.
    ///
    /// On mismatch the kind of the rejected value is returned.
    pub(crate) fn fit_default(self, value: Value) -> Result<Value, &'static str> {
        match (self, value) {
            (ArgType::Text, v @ Value::Text(_)) => Ok(v),
            (ArgType::Int | ArgType::Counter, v @ Value::Int(_)) => Ok(v),
            (ArgType::Float, v @ Value::Float(_)) => Ok(v),
            (ArgType::Float, Value::Int(n)) => Ok(Value::Float(n as f64)),
            (ArgType::Bool, v @ Value::Bool(_)) => Ok(v),
            (ArgType::List, v @ Value::List(_)) => Ok(v),
            (ArgType::Timestamp, v @ Value::Timestamp(_)) => Ok(v),
            (_, v) => Err(v.kind()),
        }
    }
}

impl Display for ArgType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ArgType::Text => "text",
            ArgType::Int => "integer",
            ArgType::Float => "float",
            ArgType::Bool => "boolean",
            ArgType::List => "list",
            ArgType::Counter => "counter",
            ArgType::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A typed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
    Timestamp(DateTime<FixedOffset>),
}

impl Value {
    /// A short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => f.write_str(&items.join(",")),
            Value::Timestamp(ts) => f.write_str(&ts.to_rfc3339()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::List(value.into_iter().map(|s| s.to_owned()).collect())
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::Timestamp(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value.into())
    }
}

/// Accepts `true`/`false`, `t`/`f` and `1`/`0`, ignoring case.
fn parse_bool(raw: &str) -> Result<bool, ValueErr> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(ValueErr::Bool(raw.to_owned())),
    }
}

/// Parse a timestamp in one of the supported layouts.
///
/// RFC 3339 keeps its offset; every other layout is read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, ValueErr> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts);
    }

    let naive = NaiveDate::parse_from_str(raw, DATE_LAYOUT).ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .or_else(|| NaiveDateTime::parse_from_str(raw, DATETIME_LAYOUT).ok())
        .or_else(|| NaiveDate::parse_from_str(raw, US_DATE_LAYOUT).ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
        .or_else(|| NaiveDateTime::parse_from_str(raw, US_DATETIME_LAYOUT).ok());

    match naive {
        Some(naive) => Ok(Utc.from_utc_datetime(&naive).into()),
        None => Err(ValueErr::Timestamp(raw.to_owned())),
    }
}
