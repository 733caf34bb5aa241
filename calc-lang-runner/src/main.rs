mod repl;
mod runner;

use clap::Parser;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// calc-lang. A command line calculator
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Script to evaluate line by line instead of starting the REPL
    path: Option<PathBuf>,
    /// Evaluate a single line and exit
    #[arg(short, long, conflicts_with = "path")]
    expression: Option<String>,
    /// Do not print the REPL banner
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Error)]
enum RunnerError {
    #[error("could not read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("line editor failed: {0}")]
    Readline(#[from] ReadlineError),
}

fn run(cli: Cli) -> Result<(), RunnerError> {
    match (cli.path, cli.expression) {
        (_, Some(expression)) => runner::execute(&expression),
        (Some(path), None) => {
            let source = std::fs::read_to_string(path)?;
            runner::execute(&source);
        }
        (None, None) => repl::start(cli.quiet)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
