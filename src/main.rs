//! Shape packing puzzle runner.
//!
//! Reads a puzzle file containing a shape catalog and a list of grid
//! puzzles, then reports for each puzzle whether every required shape
//! instance can be placed on the grid without overlap.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use shapefit::{parser, solver};

/// Decides, for each puzzle in the input file, whether its required shapes
/// all fit on the grid without overlap.
#[derive(Parser)]
#[command(name = "shapefit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Puzzle file with shape patterns and puzzle lines.
    input: PathBuf,
    /// Print only the number of solvable puzzles.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let input = match fs::read_to_string(&cli.input) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Failed to read {}: {}", cli.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match run(&input, cli.quiet) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to parse input: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Solves every puzzle in the input and renders the verdict report.
fn run(input: &str, quiet: bool) -> Result<String, parser::ParseError> {
    let (catalog, puzzles) = parser::parse(input)?;

    let mut report = String::new();
    let mut solved = 0;
    for (i, puzzle) in puzzles.iter().enumerate() {
        let mut board = puzzle.board(&catalog);
        let solvable = solver::solve(&mut board, &catalog);
        if solvable {
            solved += 1;
        }
        if !quiet {
            let verdict = if solvable { "solvable" } else { "not solvable" };
            let _ = writeln!(report, "Puzzle {i}: {verdict}");
        }
    }
    let _ = writeln!(report, "{solved}");

    Ok(report)
}
