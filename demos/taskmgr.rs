//! A task manager front end built from subcommands.
//!
//! Try `cargo run --example taskmgr -- add -t "Write docs" -p 2 --labels docs,rust`
//! or `RUST_LOG=argparse=trace cargo run --example taskmgr -- list -a` to watch the token walk.

use argparse::{ArgConfig, CommandLine, OptionErr, Parser};
use chrono::{Duration, Utc};

mod common;

use common::init_tracing;

fn main() -> Result<(), OptionErr> {
    init_tracing();

    let parser = build_parser()?;
    let cmd = parser.parse_or_exit();

    match cmd.subcommand() {
        Some("add") => handle_add(&cmd),
        Some("list") => handle_list(&cmd),
        Some("remove") => handle_remove(&cmd),
        _ => print!("{}", parser.render_help()),
    }
    Ok(())
}

fn build_parser() -> Result<Parser, OptionErr> {
    let mut parser = Parser::new("taskmgr", "Task management application");
    parser.add_help()?.add_version()?;

    parser.add_command("add", "Add a new task")?
        .add_string("t", "title", ArgConfig::new().desc("Task title").required(true))?
        .add_string("d", "description", ArgConfig::new().desc("Task description"))?
        .add_int("p", "priority", ArgConfig::new()
            .desc("Task priority (1-5)")
            .default_value(3)
            .choices(["1", "2", "3", "4", "5"]))?
        .add_datetime("", "due", ArgConfig::new().desc("Due date (format: YYYY-MM-DD)"))?
        .add_list("l", "labels", ArgConfig::new().desc("Task labels (comma-separated)"))?;

    parser.add_command("list", "List all tasks")?
        .add_bool("a", "all", ArgConfig::new().desc("Show all tasks including completed"))?
        .add_string("s", "sort", ArgConfig::new()
            .desc("Sort order")
            .default_value("priority")
            .choices(["priority", "date", "title"]))?
        .add_int("", "limit", ArgConfig::new()
            .desc("Maximum number of tasks to show")
            .default_value(10))?;

    parser.add_command("remove", "Remove a task")?
        .add_int("i", "id", ArgConfig::new().desc("Task ID to remove").required(true))?
        .add_bool("f", "force", ArgConfig::new().desc("Force removal without confirmation"))?;

    Ok(parser)
}

fn handle_add(cmd: &CommandLine) {
    println!("Adding task: {}", cmd.get_string("title"));
    println!("Priority: {}", cmd.get_int("priority"));

    let description = cmd.get_string("description");
    if !description.is_empty() {
        println!("Description: {}", description);
    }
    if cmd.has_value("due") {
        println!("Due date: {}", cmd.get_datetime("due").format("%Y-%m-%d"));
    }

    let labels = cmd.get_list("labels");
    if !labels.is_empty() {
        println!("Labels:");
        for label in labels {
            println!("  - {}", label);
        }
    }
    println!("Task added successfully!");
}

fn handle_list(cmd: &CommandLine) {
    println!("Listing tasks (limit: {})", cmd.get_int("limit"));
    println!("Sort by: {}", cmd.get_string("sort"));

    if cmd.get_bool("all") {
        println!("Including completed tasks");
    } else {
        println!("Only showing pending tasks");
    }

    let today = Utc::now();
    for i in 1..=cmd.get_int("limit").min(5) {
        let due = today + Duration::days(i);
        println!("[{}] Task {} - Priority: {}, Due: {}", i, i, (i % 3) + 1, due.format("%Y-%m-%d"));
    }
}

fn handle_remove(cmd: &CommandLine) {
    let id = cmd.get_int("id");
    if cmd.get_bool("force") {
        println!("Removing task {} without confirmation...", id);
    } else {
        println!("Are you sure you want to remove task {}? (simulating 'yes')", id);
    }
    println!("Task {} removed successfully!", id);
}
