//! A minimal program: one required option, one flag, one positional.
//!
//! Try `cargo run --example basic -- -b --name Ada notes.txt`.

use argparse::{ArgConfig, OptionErr, Parser};

mod common;

use common::init_tracing;

fn main() -> Result<(), OptionErr> {
    init_tracing();

    let mut parser = Parser::new("example", "Example command-line application");
    parser.add_help()?
        .add_version()?
        .add_string("n", "name", ArgConfig::new().desc("Your name").required(true))?
        .add_bool("b", "verbose", ArgConfig::new().desc("Enable verbose output"))?
        .add_positional("file", ArgConfig::new().desc("File to process").required(true))?;

    let cmd = parser.parse_or_exit();

    println!("Hello, {}!", cmd.get_string("name"));
    if cmd.get_bool("verbose") {
        println!("Verbose mode enabled");
        println!("Additional information will be displayed");
    }
    println!("Processing file: {}", cmd.get_string("file"));
    Ok(())
}
