//! Every argument type in one parser.
//!
//! Try `cargo run --example complete -- -r req -cc -l a,b --datetime 2023-01-01 pos`.

use argparse::{ArgConfig, OptionErr, Parser};

mod common;

use common::init_tracing;

fn main() -> Result<(), OptionErr> {
    init_tracing();

    let mut parser = Parser::new("complete", "Demonstration of all argument types");
    parser.add_help()?
        .add_version()?
        .add_string("s", "string", ArgConfig::new()
            .desc("String argument example")
            .default_value("default string"))?
        .add_int("i", "integer", ArgConfig::new()
            .desc("Integer argument example")
            .default_value(42))?
        .add_float("f", "float", ArgConfig::new()
            .desc("Float argument example")
            .default_value(2.5))?
        .add_bool("b", "boolean", ArgConfig::new().desc("Boolean argument example"))?
        .add_list("l", "list", ArgConfig::new()
            .desc("List argument example (comma-separated values)")
            .default_value(vec!["default", "values"]))?
        .add_counter("c", "counter", ArgConfig::new()
            .desc("Counter argument example (use multiple times to increase)"))?
        .add_datetime("d", "datetime", ArgConfig::new()
            .desc("DateTime argument example (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)"))?
        .add_string("", "choice", ArgConfig::new()
            .desc("Argument with limited choices")
            .default_value("option1")
            .choices(["option1", "option2", "option3"]))?
        .add_string("r", "required", ArgConfig::new()
            .desc("Required argument example")
            .required(true))?
        .add_positional("positional", ArgConfig::new()
            .desc("Positional argument example")
            .required(true))?;

    let cmd = parser.parse_or_exit();

    println!("Arguments:");
    println!("  String:    {}", cmd.get_string("string"));
    println!("  Integer:   {}", cmd.get_int("integer"));
    println!("  Float:     {:.2}", cmd.get_float("float"));
    println!("  Boolean:   {}", cmd.get_bool("boolean"));

    let list = cmd.get_list("list");
    println!("  List:      {:?} (length: {})", list, list.len());
    println!("  Counter:   {}", cmd.get_int("counter"));

    if cmd.has_value("datetime") {
        println!("  DateTime:  {}", cmd.get_datetime("datetime").to_rfc2822());
    } else {
        println!("  DateTime:  not provided");
    }

    println!("  Choice:    {}", cmd.get_string("choice"));
    println!("  Required:  {}", cmd.get_string("required"));
    println!("  Positional: {}", cmd.get_string("positional"));
    Ok(())
}
