//! Command line front end for the labyrinth maze solver.
//!
//! Usage:
//!   labyrinth solve <maze> [--json] [--max-steps <n>] [--format auto|text|json]
//!   labyrinth render <maze>
//!
//! Exits with 0 when a path is found, 1 when none exists or the step budget
//! ran out, 2 on invalid input.

mod load;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use labyrinth_core::{Maze, SearchLimits};

use load::{LayoutFormat, load_layout};
use report::SolveReport;

#[derive(Parser, Debug)]
#[command(name = "labyrinth", version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search a maze for a path from start to exit
    Solve(SolveArgs),
    /// Print a maze without searching it
    Render(MazeArgs),
}

#[derive(Args, Debug)]
struct MazeArgs {
    /// Maze file, `-` reads from stdin
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Layout format of the maze file
    #[arg(long, value_enum, default_value_t = LayoutFormat::Auto)]
    format: LayoutFormat,
}

#[derive(Args, Debug)]
struct SolveArgs {
    #[command(flatten)]
    maze: MazeArgs,

    /// Stop after this many search steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", error_message(&err));
            ExitCode::from(2)
        }
    }
}

/// The whole context chain on one line, printed once to stderr.
fn error_message(err: &anyhow::Error) -> String {
    format!("Error: {err:#}")
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Solve(args) => solve(args),
        Commands::Render(args) => {
            let maze = open_maze(&args)?;
            println!("{maze}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_maze(args: &MazeArgs) -> Result<Maze> {
    let layout = load_layout(&args.file, args.format)?;
    log::info!(
        "Maze {:?} with {} walls, start {:?}, exit {:?}",
        layout.size,
        layout.walls.len(),
        layout.start,
        layout.exit
    );
    Ok(Maze::from_layout(&layout)?)
}

fn solve(args: SolveArgs) -> Result<ExitCode> {
    let mut maze = open_maze(&args.maze)?;
    let limits = SearchLimits {
        max_steps: args.max_steps,
    };

    let outcome = maze.search(limits)?;
    let report = SolveReport::new(&maze, outcome);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.rendering);
        println!("{}", report.summary());
    }

    Ok(if report.found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use crate::load::parse_layout;

    #[test]
    fn error_message_joins_context_and_cause_once() {
        let err = parse_layout("2 2\n0 0\n", LayoutFormat::Text)
            .context("Invalid maze in broken.txt")
            .unwrap_err();

        let message = error_message(&err);

        assert_eq!(
            message,
            "Error: Invalid maze in broken.txt: Malformed maze description on line 3"
        );
        assert_eq!(message.matches("line 3").count(), 1);
    }
}
