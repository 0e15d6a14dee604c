use std::collections::HashMap;

use tracing::{debug, trace};

use crate::cmd::CommandLine;
use crate::error::ParseErr;
use crate::option::Argument;
use crate::parser::{ParseOutcome, Parser, HELP, VERSION};
use crate::util::Util;
use crate::value::{ArgType, Value};

/// Identity of a definition within one parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    Option(usize),
    Positional(usize),
}

/// The state of a single parse call over one [`Parser`].
///
/// A `Matcher` is created per call, so the registry itself is never mutated.
pub(crate) struct Matcher<'p, 't> {
    parser: &'p Parser,
    tokens: &'t [&'t str],
    cursor: usize,
    next_positional: usize,
    cmd: CommandLine,
    /// Definitions supplied so far, with the raw text for value-taking ones.
    seen: HashMap<Slot, Option<&'t str>>,
    help: bool,
    version: bool,
}

impl<'p, 't> Matcher<'p, 't> {
    pub(crate) fn new(parser: &'p Parser, tokens: &'t [&'t str]) -> Matcher<'p, 't> {
        Matcher {
            parser,
            tokens,
            cursor: 0,
            next_positional: 0,
            cmd: CommandLine::new(),
            seen: HashMap::new(),
            help: false,
            version: false,
        }
    }

    pub(crate) fn run(mut self) -> Result<ParseOutcome, ParseErr> {
        self.seed_defaults();

        while self.cursor < self.tokens.len() {
            let token = self.tokens[self.cursor];

            if self.cursor == 0 {
                if let Some(child) = self.parser.get_command(token) {
                    return self.delegate(token, child);
                }
            }

            self.handle_token(token)?;
            self.cursor += 1;
        }

        if self.help {
            debug!(parser = %self.parser.get_name(), "help requested, skipping validation");
            return Ok(ParseOutcome::Help(self.parser.render_help()));
        }
        if self.version {
            debug!(parser = %self.parser.get_name(), "version requested, skipping validation");
            return Ok(ParseOutcome::Version(self.parser.version_line()));
        }

        self.validate()?;
        Ok(ParseOutcome::Matches(self.cmd))
    }

    fn seed_defaults(&mut self) {
        let parser = self.parser;
        for arg in parser.get_options().iter().chain(parser.get_positionals()) {
            if let Some(value) = arg.get_default() {
                self.cmd.set_default(arg.get_name(), value.clone());
            }
        }
    }

    /// Hand every token after the first to `child`. The parent's own
    /// definitions are neither matched nor validated on this path.
    fn delegate(mut self, name: &str, child: &Parser) -> Result<ParseOutcome, ParseErr> {
        debug!(parser = %self.parser.get_name(), command = name, "delegating to subcommand");

        match Matcher::new(child, &self.tokens[1..]).run()? {
            ParseOutcome::Matches(sub) => {
                self.cmd.merge_subcommand(name, sub);
                Ok(ParseOutcome::Matches(self.cmd))
            }
            outcome => Ok(outcome),
        }
    }

    fn handle_token(&mut self, token: &'t str) -> Result<(), ParseErr> {
        trace!(token, cursor = self.cursor, "handling token");

        if let Some(body) = token.strip_prefix("--") {
            self.handle_long_option(body)
        } else if token.len() > 1 && token.starts_with('-') {
            self.handle_short_options(&token[1..])
        } else {
            self.handle_positional(token)
        }
    }

    fn handle_long_option(&mut self, body: &'t str) -> Result<(), ParseErr> {
        let (name, inline) = Util::split_inline_value(body);

        match name {
            HELP => {
                self.help = true;
                return Ok(());
            }
            VERSION => {
                self.version = true;
                return Ok(());
            }
            _ => {}
        }

        let parser = self.parser;
        let display = format!("--{}", name);
        let (index, option) = parser.find_long(name)
            .ok_or_else(|| ParseErr::UnknownOption(display.clone()))?;

        if !option.get_type().takes_value() {
            self.handle_flag(index, option);
            return Ok(());
        }

        let value = match inline {
            Some(value) => value,
            None => self.next_value().ok_or_else(|| ParseErr::MissingValue(display.clone()))?,
        };
        self.store(Slot::Option(index), option, display, value)
    }

    /// Walk a cluster like `-abc` or `-p8080`.
    ///
    /// Booleans and counters are applied and the walk continues. The first
    /// value-taking alias claims the rest of the cluster, or the next token,
    /// as its value and ends the walk.
    fn handle_short_options(&mut self, cluster: &'t str) -> Result<(), ParseErr> {
        match cluster {
            "h" => self.help = true,
            "V" => self.version = true,
            _ => {}
        }

        let parser = self.parser;
        for (pos, c) in cluster.char_indices() {
            let display = format!("-{}", c);
            let (index, option) = parser.find_short(c)
                .ok_or_else(|| ParseErr::UnknownOption(display.clone()))?;

            if !option.get_type().takes_value() {
                self.handle_flag(index, option);
                continue;
            }

            let rest = &cluster[pos + c.len_utf8()..];
            let value = if !rest.is_empty() {
                rest
            } else {
                self.next_value().ok_or_else(|| ParseErr::MissingValue(display.clone()))?
            };
            return self.store(Slot::Option(index), option, display, value);
        }
        Ok(())
    }

    fn handle_positional(&mut self, token: &'t str) -> Result<(), ParseErr> {
        let parser = self.parser;
        let index = self.next_positional;
        let positional = parser.get_positionals().get(index)
            .ok_or_else(|| ParseErr::UnrecognizedPositional(token.to_owned()))?;

        self.next_positional += 1;
        self.store(Slot::Positional(index), positional, positional.get_name().to_owned(), token)
    }

    /// Apply a boolean or counter occurrence.
    fn handle_flag(&mut self, index: usize, option: &Argument) {
        let value = match option.get_type() {
            ArgType::Counter => Value::Int(self.cmd.get_int(option.get_name()).saturating_add(1)),
            _ => Value::Bool(true),
        };

        match option.get_name() {
            HELP => self.help = true,
            VERSION => self.version = true,
            _ => {}
        }

        self.seen.insert(Slot::Option(index), None);
        self.cmd.set_value(option.get_name(), value);
    }

    /// Take the next token as a value, unless it is missing or looks like a flag.
    fn next_value(&mut self) -> Option<&'t str> {
        let next = *self.tokens.get(self.cursor + 1)?;
        if next.starts_with('-') {
            return None;
        }
        self.cursor += 1;
        Some(next)
    }

    fn store(&mut self, slot: Slot, arg: &Argument, display: String, raw: &'t str) -> Result<(), ParseErr> {
        let value = arg.get_type().coerce(raw)
            .map_err(|source| ParseErr::InvalidValue { arg: display, source })?;

        trace!(name = arg.get_name(), %value, "stored value");
        self.seen.insert(slot, Some(raw));
        self.cmd.set_value(arg.get_name(), value);
        Ok(())
    }

    /// Check required arguments and choice sets, options first, in registration order.
    fn validate(&self) -> Result<(), ParseErr> {
        let parser = self.parser;
        let options = parser.get_options().iter().enumerate()
            .map(|(i, arg)| (Slot::Option(i), arg));
        let positionals = parser.get_positionals().iter().enumerate()
            .map(|(i, arg)| (Slot::Positional(i), arg));

        for (slot, arg) in options.chain(positionals) {
            match self.seen.get(&slot) {
                None if arg.is_required() => {
                    return Err(ParseErr::MissingRequired(arg.display_name()));
                }
                Some(Some(raw)) if !arg.accepts_choice(raw) => {
                    return Err(ParseErr::InvalidChoice {
                        arg: arg.display_name(),
                        value: raw.to_string(),
                        choices: arg.get_choices().to_vec(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc};
    use pretty_assertions::assert_eq;

    use crate::cmd::{CommandLine, SUBCOMMAND_KEY};
    use crate::error::{ParseErr, ValueErr};
    use crate::option::ArgConfig;
    use crate::parser::{ParseOutcome, Parser};
    use crate::value::{ArgType, Value};

    fn matches(parser: &Parser, args: &[&str]) -> CommandLine {
        match parser.parse_args(args) {
            Ok(ParseOutcome::Matches(cmd)) => cmd,
            other => panic!("expected matches for {:?}, got {:?}", args, other),
        }
    }

    fn complete() -> Parser {
        let mut parser = Parser::new("complete", "Demonstration of all argument types");
        parser.add_help().unwrap()
            .add_version().unwrap()
            .add_string("s", "string", ArgConfig::new().default_value("default string")).unwrap()
            .add_int("i", "integer", ArgConfig::new().default_value(42)).unwrap()
            .add_float("f", "float", ArgConfig::new().default_value(3.14)).unwrap()
            .add_bool("b", "boolean", ArgConfig::new()).unwrap()
            .add_list("l", "list", ArgConfig::new().default_value(vec!["default", "values"])).unwrap()
            .add_counter("c", "counter", ArgConfig::new()).unwrap()
            .add_datetime("d", "datetime", ArgConfig::new()).unwrap()
            .add_string("", "choice", ArgConfig::new()
                .default_value("option1")
                .choices(["option1", "option2", "option3"])).unwrap()
            .add_string("r", "required", ArgConfig::new().required(true)).unwrap()
            .add_positional("positional", ArgConfig::new().required(true)).unwrap();
        parser
    }

    fn taskmgr() -> Parser {
        let mut parser = Parser::new("taskmgr", "Task management application");
        parser.add_help().unwrap().add_version().unwrap()
            .add_string("", "store", ArgConfig::new().required(true)).unwrap();

        parser.add_command("add", "Add a new task").unwrap()
            .add_string("t", "title", ArgConfig::new().required(true)).unwrap()
            .add_int("p", "priority", ArgConfig::new()
                .default_value(3)
                .choices(["1", "2", "3", "4", "5"])).unwrap()
            .add_list("l", "labels", ArgConfig::new()).unwrap();
        parser.add_command("list", "List all tasks").unwrap()
            .add_bool("a", "all", ArgConfig::new()).unwrap();
        parser.add_command("remove", "Remove a task").unwrap()
            .add_int("i", "id", ArgConfig::new().required(true)).unwrap();
        parser
    }

    #[test]
    fn test_defaults_for_every_type() {
        let cmd = matches(&complete(), &["-r", "x", "pos"]);

        assert_eq!(Some(&Value::from("default string")), cmd.get("string"));
        assert_eq!(Some(&Value::Int(42)), cmd.get("integer"));
        assert_eq!(Some(&Value::Float(3.14)), cmd.get("float"));
        assert_eq!(Some(&Value::Bool(false)), cmd.get("boolean"));
        assert_eq!(Some(&Value::from(vec!["default", "values"])), cmd.get("list"));
        assert_eq!(Some(&Value::Int(0)), cmd.get("counter"));
        assert_eq!(Some(&Value::from("option1")), cmd.get("choice"));
        assert_eq!(None, cmd.get("datetime"));
        assert!(!cmd.is_supplied("integer"));
        assert!(cmd.is_supplied("required"));
    }

    #[test]
    fn test_timestamp_default() {
        let due = Utc.with_ymd_and_hms(2020, 5, 6, 0, 0, 0).unwrap();
        let mut parser = Parser::new("demo", "");
        parser.add_datetime("d", "due", ArgConfig::new().default_value(due)).unwrap();

        let cmd = matches(&parser, &[]);
        assert_eq!(DateTime::<FixedOffset>::from(due), cmd.get_datetime("due"));
        assert!(cmd.has_value("due"));
        assert!(!cmd.is_supplied("due"));

        let cmd = matches(&parser, &["--due", "2021-01-01"]);
        assert_eq!(2021, cmd.get_datetime("due").year());
        assert!(cmd.is_supplied("due"));
    }

    #[test]
    fn test_every_type_from_command_line() {
        let cmd = matches(&complete(), &[
            "--string", "hello", "-i", "7", "--float=2.5", "-b", "--list", "a,b,c",
            "-cc", "--counter", "-d", "2023-01-01 15:04:05", "--choice", "option3",
            "--required=yes", "file.txt",
        ]);

        assert_eq!("hello", cmd.get_string("string"));
        assert_eq!(7, cmd.get_int("integer"));
        assert_eq!(2.5, cmd.get_float("float"));
        assert!(cmd.get_bool("boolean"));
        assert_eq!(["a".to_string(), "b".to_string(), "c".to_string()], cmd.get_list("list"));
        assert_eq!(3, cmd.get_int("counter"));
        let ts = cmd.get_datetime("datetime");
        assert_eq!((2023, 15, 4, 5), (ts.year(), ts.hour(), ts.minute(), ts.second()));
        assert_eq!("option3", cmd.get_string("choice"));
        assert_eq!("yes", cmd.get_string("required"));
        assert_eq!("file.txt", cmd.get_string("positional"));
    }

    #[test]
    fn test_missing_required_option() {
        assert_eq!(Err(ParseErr::MissingRequired("--required/-r".into())),
                   complete().parse_args(&["pos"]));
    }

    #[test]
    fn test_missing_required_positional() {
        assert_eq!(Err(ParseErr::MissingRequired("positional".into())),
                   complete().parse_args(&["-r", "x"]));
    }

    #[test]
    fn test_counter_occurrences() {
        let mut parser = Parser::new("demo", "");
        parser.add_counter("c", "count", ArgConfig::new()).unwrap()
            .add_counter("v", "verbose", ArgConfig::new().default_value(2)).unwrap();

        let cmd = matches(&parser, &["-c", "-c", "-c", "-c"]);
        assert_eq!(4, cmd.get_int("count"));
        assert_eq!(2, cmd.get_int("verbose"));

        let cmd = matches(&parser, &["-vcv", "--verbose=10"]);
        assert_eq!(1, cmd.get_int("count"));
        assert_eq!(5, cmd.get_int("verbose"));

        assert_eq!(0, matches(&parser, &[]).get_int("count"));
    }

    #[test]
    fn test_counter_saturates() {
        let mut parser = Parser::new("demo", "");
        parser.add_counter("c", "count", ArgConfig::new().default_value(i64::MAX)).unwrap();

        assert_eq!(i64::MAX, matches(&parser, &["-cc"]).get_int("count"));
    }

    #[test]
    fn test_cluster_ends_with_value_option() {
        let mut parser = Parser::new("demo", "");
        parser.add_bool("a", "alpha", ArgConfig::new()).unwrap()
            .add_bool("b", "beta", ArgConfig::new()).unwrap()
            .add_string("c", "gamma", ArgConfig::new()).unwrap();

        let cmd = matches(&parser, &["-abc", "value"]);
        assert!(cmd.get_bool("alpha"));
        assert!(cmd.get_bool("beta"));
        assert_eq!("value", cmd.get_string("gamma"));
    }

    #[test]
    fn test_value_option_claims_rest_of_cluster() {
        let mut parser = Parser::new("demo", "");
        parser.add_bool("a", "alpha", ArgConfig::new()).unwrap()
            .add_string("c", "gamma", ArgConfig::new()).unwrap();

        let cmd = matches(&parser, &["-cab"]);
        assert_eq!("ab", cmd.get_string("gamma"));
        assert!(!cmd.get_bool("alpha"));
    }

    #[test]
    fn test_fused_short_value() {
        let mut parser = Parser::new("demo", "");
        parser.add_int("p", "port", ArgConfig::new()).unwrap()
            .add_positional("rest", ArgConfig::new()).unwrap();

        let cmd = matches(&parser, &["-p8080", "other"]);
        assert_eq!(8080, cmd.get_int("port"));
        assert_eq!("other", cmd.get_string("rest"));

        assert!(matches!(parser.parse_args(&["-p80x"]),
                         Err(ParseErr::InvalidValue { source: ValueErr::Int { .. }, .. })));
    }

    #[test]
    fn test_invalid_choice() {
        let err = complete().parse_args(&["-r", "x", "pos", "--choice", "invalid"]).unwrap_err();
        assert_eq!(ParseErr::InvalidChoice {
            arg: "--choice".into(),
            value: "invalid".into(),
            choices: vec!["option1".into(), "option2".into(), "option3".into()],
        }, err);
    }

    #[test]
    fn test_invalid_positional_choice() {
        let mut parser = Parser::new("demo", "");
        parser.add_positional("mode", ArgConfig::new().choices(["fast", "safe"])).unwrap();

        assert_eq!("safe", matches(&parser, &["safe"]).get_string("mode"));

        let err = parser.parse_args(&["slow"]).unwrap_err();
        assert_eq!(ParseErr::InvalidChoice {
            arg: "mode".into(),
            value: "slow".into(),
            choices: vec!["fast".into(), "safe".into()],
        }, err);
    }

    #[test]
    fn test_choice_compared_as_text() {
        let parser = taskmgr();
        let cmd = matches(&parser, &["add", "-t", "X", "-p", "5"]);
        assert_eq!(5, cmd.get_int("priority"));

        assert!(matches!(parser.parse_args(&["add", "-t", "X", "-p", "05"]),
                         Err(ParseErr::InvalidChoice { .. })));
    }

    #[test]
    fn test_subcommand_delegation() {
        let cmd = matches(&taskmgr(), &["add", "-t", "X"]);

        assert_eq!(Some("add"), cmd.subcommand());
        assert_eq!("add", cmd.get_string(SUBCOMMAND_KEY));
        assert_eq!("X", cmd.get_string("title"));
        assert_eq!(3, cmd.get_int("priority"));
        assert!(!cmd.has_value("store"));
        assert!(!cmd.has_value("all"));
    }

    #[test]
    fn test_subcommand_only_in_first_position() {
        let parser = taskmgr();
        assert_eq!(Err(ParseErr::UnrecognizedPositional("add".into())),
                   parser.parse_args(&["--store", "db", "add"]));

        let cmd = matches(&parser, &["--store", "add"]);
        assert_eq!(None, cmd.subcommand());
        assert_eq!("add", cmd.get_string("store"));
    }

    #[test]
    fn test_subcommand_errors_propagate() {
        let parser = taskmgr();
        assert_eq!(Err(ParseErr::MissingRequired("--id/-i".into())), parser.parse_args(&["remove"]));
        assert_eq!(Err(ParseErr::UnknownOption("-t".into())), parser.parse_args(&["list", "-t", "X"]));
    }

    #[test]
    fn test_nested_subcommands() {
        let mut parser = Parser::new("tool", "");
        parser.add_command("remote", "").unwrap()
            .add_command("add", "").unwrap()
            .add_positional("url", ArgConfig::new().required(true)).unwrap();

        let cmd = matches(&parser, &["remote", "add", "https://example.com"]);
        assert_eq!(Some("remote"), cmd.subcommand());
        assert_eq!(["remote".to_string(), "add".to_string()], cmd.subcommand_path());
        assert_eq!("https://example.com", cmd.get_string("url"));
    }

    #[test]
    fn test_help_short_circuits_validation() {
        let parser = complete();
        for args in [vec!["-h"], vec!["--help"], vec!["pos", "-h"], vec!["-bh"], vec!["-V", "-h"]] {
            assert_eq!(Ok(ParseOutcome::Help(parser.render_help())), parser.parse_args(&args), "{:?}", args);
        }
    }

    #[test]
    fn test_version_short_circuits_validation() {
        let mut parser = complete();
        parser.set_version("1.2.3");
        assert_eq!(Ok(ParseOutcome::Version("complete 1.2.3".into())), parser.parse_args(&["-V"]));
        assert_eq!(Ok(ParseOutcome::Version("complete 1.2.3".into())), parser.parse_args(&["--version"]));
    }

    #[test]
    fn test_long_help_without_definition() {
        let parser = Parser::new("bare", "");
        assert!(matches!(parser.parse_args(&["--help"]), Ok(ParseOutcome::Help(_))));
        assert_eq!(Err(ParseErr::UnknownOption("-h".into())), parser.parse_args(&["-h"]));
    }

    #[test]
    fn test_subcommand_help() {
        let parser = taskmgr();
        let add = parser.get_command("add").unwrap();

        assert_eq!(Ok(ParseOutcome::Help(add.render_help())), parser.parse_args(&["add", "--help"]));
        assert_eq!(Err(ParseErr::UnknownOption("-h".into())), parser.parse_args(&["add", "-h"]));
    }

    #[test]
    fn test_errors_are_fail_fast() {
        let parser = complete();
        assert_eq!(Err(ParseErr::UnknownOption("--nope".into())), parser.parse_args(&["--nope", "-x"]));
        assert_eq!(Err(ParseErr::UnknownOption("-x".into())), parser.parse_args(&["-bx"]));
        assert_eq!(Err(ParseErr::MissingValue("--string".into())), parser.parse_args(&["--string"]));
        assert_eq!(Err(ParseErr::MissingValue("-s".into())), parser.parse_args(&["-s", "-b"]));
        assert_eq!(Err(ParseErr::UnrecognizedPositional("two".into())),
                   parser.parse_args(&["one", "two", "--nope"]));
        assert!(matches!(parser.parse_args(&["-d", "not-a-date"]),
                         Err(ParseErr::InvalidValue { source: ValueErr::Timestamp(_), .. })));
    }

    #[test]
    fn test_bool_flag_ignores_inline_value() {
        let cmd = matches(&complete(), &["--boolean=false", "-r", "x", "pos"]);
        assert!(cmd.get_bool("boolean"));
    }

    #[test]
    fn test_inline_value_may_start_with_dash() {
        let cmd = matches(&complete(), &["--integer=-5", "-i-6", "-r", "x", "pos"]);
        assert_eq!(-6, cmd.get_int("integer"));
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let cmd = matches(&complete(), &["-r", "x", "-"]);
        assert_eq!("-", cmd.get_string("positional"));
    }

    #[test]
    fn test_typed_positionals() {
        let mut parser = Parser::new("demo", "");
        parser.add_positional_typed("count", ArgType::Int, ArgConfig::new()).unwrap()
            .add_positional_typed("when", ArgType::Timestamp, ArgConfig::new()).unwrap()
            .add_positional("label", ArgConfig::new().default_value("none")).unwrap();

        let cmd = matches(&parser, &["3", "01/02/2006"]);
        assert_eq!(3, cmd.get_int("count"));
        assert_eq!(2, cmd.get_datetime("when").day());
        assert_eq!("none", cmd.get_string("label"));

        assert!(matches!(parser.parse_args(&["three"]),
                         Err(ParseErr::InvalidValue { ref arg, .. }) if arg == "count"));
    }

    #[test]
    fn test_empty_list_value() {
        let mut parser = Parser::new("demo", "");
        parser.add_list("l", "labels", ArgConfig::new()).unwrap();
        let cmd = matches(&parser, &["--labels="]);
        assert_eq!([String::new()], cmd.get_list("labels"));
    }
}
