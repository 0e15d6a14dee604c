use std::io::{self, Write};

use crate::option::Argument;
use crate::parser::Parser;
use crate::value::{ArgType, Value};

const DEFAULT_LEFT_PAD: usize = 2;
const DEFAULT_DESC_PAD: usize = 2;
const DEFAULT_SYNTAX_PREFIX: &str = "Usage: ";
const DEFAULT_NEWLINE: &str = "\n";

/// `HelpFormatter` renders usage information for a [`Parser`].
///
/// The output format is like:
/// ```txt
/// Usage: <name> [options] <positional> [<optional positional>] {<cmd>,<cmd>}
///
/// <description>
///
/// Positional arguments:
///   <name>                <description>
///
/// Optional arguments:
///   -<short>, --<long>    <description>
///       --<long> <TYPE>   <description> [choices: a, b] (default: a)
///
/// Commands:
///   <name>                <description>
///
/// [epilog]
/// ```
#[derive(Debug, Clone)]
pub struct HelpFormatter {
    left_pad: usize,
    desc_pad: usize,
    syntax_prefix: String,
    newline: String,
    annotate: bool,
}

impl Default for HelpFormatter {
    fn default() -> Self {
        HelpFormatter::new()
    }
}

impl HelpFormatter {
    /// Create a `HelpFormatter` with default configuration.
    pub fn new() -> HelpFormatter {
        HelpFormatter {
            left_pad: DEFAULT_LEFT_PAD,
            desc_pad: DEFAULT_DESC_PAD,
            syntax_prefix: DEFAULT_SYNTAX_PREFIX.to_string(),
            newline: DEFAULT_NEWLINE.to_string(),
            annotate: true,
        }
    }

    /// Get number of padding space before each entry.
    pub fn get_left_padding(&self) -> usize {
        self.left_pad
    }

    /// Get number of padding space between an entry and its description.
    pub fn get_desc_padding(&self) -> usize {
        self.desc_pad
    }

    pub fn get_syntax_prefix(&self) -> &str {
        &self.syntax_prefix
    }

    pub fn get_newline(&self) -> &str {
        &self.newline
    }

    /// Whether descriptions are followed by choice and default annotations.
    pub fn get_annotate(&self) -> bool {
        self.annotate
    }

    pub fn set_left_padding(&mut self, padding: usize) {
        self.left_pad = padding;
    }

    /// Set number of padding space between an entry and its description, at least 1.
    pub fn set_desc_padding(&mut self, padding: usize) {
        self.desc_pad = padding.max(1);
    }

    /// Set the syntax prefix, the default value is `"Usage: "`.
    pub fn set_syntax_prefix(&mut self, prefix: &str) {
        self.syntax_prefix = prefix.to_string();
    }

    pub fn set_newline(&mut self, newline: &str) {
        self.newline = newline.to_string();
    }

    pub fn set_annotate(&mut self, annotate: bool) {
        self.annotate = annotate;
    }

    /// Render the one line usage synopsis, without trailing newline.
    pub fn render_usage(&self, parser: &Parser) -> String {
        let mut buff = format!("{}{}", self.get_syntax_prefix(), parser.get_full_name());

        if !parser.get_options().is_empty() {
            buff.push_str(" [options]");
        }

        for pos in parser.get_positionals() {
            buff.push(' ');
            if pos.is_required() {
                buff.push_str(pos.get_name());
            } else {
                buff.push_str(&format!("[{}]", pos.get_name()));
            }
        }

        if parser.has_commands() {
            let names: Vec<&str> = parser.get_commands().map(|c| c.get_name()).collect();
            buff.push_str(&format!(" {{{}}}", names.join(",")));
        }

        buff
    }

    /// Render the complete help message.
    pub fn render_help(&self, parser: &Parser) -> String {
        let nl = self.get_newline();
        let mut buff = self.render_usage(parser);
        buff.push_str(nl);
        buff.push_str(nl);

        if !parser.get_description().is_empty() {
            buff.push_str(parser.get_description());
            buff.push_str(nl);
            buff.push_str(nl);
        }

        if !parser.get_positionals().is_empty() {
            let rows = parser.get_positionals().iter()
                .map(|pos| (pos.get_name().to_string(), self.describe(pos)))
                .collect();
            self.render_block(&mut buff, "Positional arguments:", rows);
        }

        if !parser.get_options().is_empty() {
            let rows = parser.get_options().iter()
                .map(|opt| (self.invocation(opt), self.describe(opt)))
                .collect();
            self.render_block(&mut buff, "Optional arguments:", rows);
        }

        if parser.has_commands() {
            let rows = parser.get_commands()
                .map(|cmd| (cmd.get_name().to_string(), cmd.get_description().to_string()))
                .collect();
            self.render_block(&mut buff, "Commands:", rows);
        }

        if let Some(epilog) = parser.get_epilog().filter(|e| !e.is_empty()) {
            buff.push_str(epilog);
            buff.push_str(nl);
        }

        buff
    }

    /// Print help message of the [`Parser`] to the `out` sink.
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::stderr;
    /// use argparse::{HelpFormatter, Parser};
    /// HelpFormatter::new().print_help(&mut stderr(), &Parser::new("ls", "list files")).unwrap();
    /// ```
    pub fn print_help<T: Write>(&self, out: &mut T, parser: &Parser) -> io::Result<()> {
        write!(out, "{}", self.render_help(parser))
    }

    fn create_padding(&self, len: usize) -> String {
        " ".repeat(len)
    }

    fn invocation(&self, option: &Argument) -> String {
        let mut buff = match option.get_short() {
            Some(c) => format!("-{}, --{}", c, option.get_name()),
            None => format!("    --{}", option.get_name()),
        };
        if option.get_type().takes_value() {
            buff.push_str(&format!(" <{}>", option.get_type().metavar()));
        }
        buff
    }

    fn describe(&self, arg: &Argument) -> String {
        let mut buff = arg.get_description().to_string();
        if !self.annotate {
            return buff;
        }

        if !arg.get_choices().is_empty() {
            push_word(&mut buff, &format!("[choices: {}]", arg.get_choices().join(", ")));
        }

        let shown_default = match (arg.get_type(), arg.get_default()) {
            (ArgType::Bool, _) | (_, None) => None,
            (ArgType::Counter, Some(Value::Int(0))) => None,
            (_, Some(Value::List(items))) if items.is_empty() => None,
            (_, Some(value)) => Some(value),
        };
        if let Some(value) = shown_default {
            push_word(&mut buff, &format!("(default: {})", value));
        }
        buff
    }

    fn render_block(&self, buff: &mut String, title: &str, rows: Vec<(String, String)>) {
        let left_pad = self.create_padding(self.get_left_padding());
        let max = rows.iter().map(|(entry, _)| entry.len()).max().unwrap_or(0);

        buff.push_str(title);
        buff.push_str(self.get_newline());

        for (entry, desc) in rows {
            let mut line = format!("{}{}", left_pad, entry);
            if !desc.is_empty() {
                line.push_str(&self.create_padding(max - entry.len() + self.get_desc_padding()));
                line.push_str(&desc);
            }
            buff.push_str(line.trim_end());
            buff.push_str(self.get_newline());
        }

        buff.push_str(self.get_newline());
    }
}

fn push_word(buff: &mut String, word: &str) {
    if !buff.is_empty() {
        buff.push(' ');
    }
    buff.push_str(word);
}
