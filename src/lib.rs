//! # The Argparse Library
//!
//! The Argparse library parses a program's command line into typed values.
//! A [`Parser`] declares the optional and positional arguments a command
//! accepts, and may own named child parsers as subcommands. Parsing a token
//! sequence yields a [`CommandLine`] mapping each argument name to a [`Value`],
//! or a [`ParseErr`] describing the first problem found.
//!
//! Argparse supports these argument types:
//!
//! - text, integer and float, for example `--name demo`, `-p 8080`, `--ratio=0.5`
//! - boolean flags, for example `-v` or `--verbose`
//! - comma separated lists, for example `--labels a,b,c`
//! - counters, for example `-vvv`
//! - timestamps, for example `--due 2023-01-01` or `--at "2023-01-01 15:04:05"`
//!
//! Short options may be clustered (`-abc`) and may carry their value fused
//! (`-p8080`). Positional arguments are filled in declaration order.
//!
//! A typical help message displayed by Argparse looks like this:
//!
//! ```txt
//! Usage: taskmgr [options] {add,list,remove}
//!
//! Task management application
//!
//! Optional arguments:
//!   -h, --help     Show this help message and exit
//!   -V, --version  Show program's version and exit
//!
//! Commands:
//!   add     Add a new task
//!   list    List all tasks
//!   remove  Remove a task
//! ```
//!
//! # Examples
//!
//! A simple example.
//!
//! ```
//! use argparse::{ArgConfig, Parser};
//!
//! let mut parser = Parser::new("example", "Example command-line application");
//! parser.add_help().unwrap()
//!     .add_string("n", "name", ArgConfig::new().desc("Your name").required(true)).unwrap()
//!     .add_bool("b", "verbose", ArgConfig::new().desc("Enable verbose output")).unwrap()
//!     .add_positional("file", ArgConfig::new().desc("File to process").required(true)).unwrap();
//!
//! let cmd = parser.parse_args(&["-b", "--name", "Ada", "notes.txt"]).unwrap().into_matches().unwrap();
//! assert_eq!("Ada", cmd.get_string("name"));
//! assert!(cmd.get_bool("verbose"));
//! assert_eq!("notes.txt", cmd.get_string("file"));
//! ```
//!
//! An example with subcommands.
//!
//! ```
//! use argparse::{ArgConfig, Parser, ParseErr};
//!
//! let mut parser = Parser::new("taskmgr", "Task management application");
//! parser.add_help().unwrap();
//! parser.add_command("add", "Add a new task").unwrap()
//!     .add_string("t", "title", ArgConfig::new().desc("Task title").required(true)).unwrap()
//!     .add_int("p", "priority", ArgConfig::new()
//!         .desc("Task priority (1-5)")
//!         .default_value(3)
//!         .choices(["1", "2", "3", "4", "5"])).unwrap();
//! parser.add_command("remove", "Remove a task").unwrap()
//!     .add_int("i", "id", ArgConfig::new().desc("Task ID to remove").required(true)).unwrap();
//!
//! let cmd = parser.parse_args(&["add", "-t", "Write docs"]).unwrap().into_matches().unwrap();
//! assert_eq!(Some("add"), cmd.subcommand());
//! assert_eq!(3, cmd.get_int("priority"));
//!
//! let err = parser.parse_args(&["add", "-t", "Write docs", "-p", "9"]).unwrap_err();
//! assert!(matches!(err, ParseErr::InvalidChoice { .. }));
//! ```
//!
//! Applications that do not want to handle [`ParseOutcome`] themselves call
//! [`Parser::parse_or_exit`], which prints help or version and exits with
//! status 0, or prints the error and usage and exits with status 1.

pub use cmd::{CommandLine, SUBCOMMAND_KEY};
pub use error::{OptionErr, ParseErr, ValueErr};
pub use format::HelpFormatter;
pub use option::{ArgConfig, Argument};
pub use parser::{ParseOutcome, Parser, DEFAULT_VERSION};
pub use value::{parse_timestamp, ArgType, Value};

mod format;
mod util;
mod option;
mod cmd;
mod matcher;
mod parser;
mod error;
mod value;
