//! Replays recorded boards through the play loop.
//!
//! Each file holds one board in the text format (`_` covered, `F` flagged,
//! `1`-`8` numbers, `.` opened). The files are fed to the engine in order, one
//! per cycle, and every decided action is logged instead of clicked.
//!
//! # Usage
//!
//! ```sh
//! RUST_LOG=info sweepwise cycle1.txt cycle2.txt cycle3.txt
//! ```

use std::{fs, path::PathBuf, process, time::Duration};

use clap::Parser;
use sweepwise_bot::{Bot, BotConfig, LogActuator, ScriptedSource};
use sweepwise_core::Board;
use sweepwise_solver::{CspConfig, EngineConfig};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board files, one per cycle.
    #[arg(value_name = "FILE", required = true)]
    boards: Vec<PathBuf>,

    /// End the run as stuck instead of guessing.
    #[arg(long)]
    no_guess: bool,

    /// Seed for guesses and the opening click.
    #[arg(long)]
    seed: Option<u64>,

    /// Click a random cell this close to the center before the first cycle.
    #[arg(long, value_name = "RADIUS")]
    opening_radius: Option<usize>,

    /// Stop after this many cycles.
    #[arg(long, value_name = "COUNT")]
    max_cycles: Option<usize>,

    /// Skip components with more variables than this.
    #[arg(long, value_name = "COUNT", default_value_t = 50)]
    max_variables: usize,

    /// Give up on a component after this many solutions.
    #[arg(long, value_name = "COUNT", default_value_t = 1000)]
    solution_cap: usize,

    /// Wall-clock budget of the constraint search per cycle.
    #[arg(long, value_name = "MILLIS", default_value_t = 10_000)]
    timeout_ms: u64,

    /// Number of constraint search workers.
    #[arg(long, value_name = "COUNT")]
    threads: Option<usize>,
}

fn main() {
    better_panic::install();
    env_logger::init();
    let args = Args::parse();

    let mut boards = Vec::with_capacity(args.boards.len());
    for path in &args.boards {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("Failed to read {}: {err}", path.display());
                process::exit(1);
            }
        };
        match text.parse::<Board>() {
            Ok(board) => boards.push(board),
            Err(err) => {
                eprintln!("Invalid board in {}: {err}", path.display());
                process::exit(1);
            }
        }
    }
    let Some(dims) = boards.first().map(Board::dims) else {
        eprintln!("No boards given");
        process::exit(1);
    };

    let config = BotConfig {
        engine: EngineConfig {
            csp: CspConfig {
                max_variables: args.max_variables,
                solution_cap: args.solution_cap,
                timeout: Duration::from_millis(args.timeout_ms),
            },
            worker_threads: args.threads,
            guessing: !args.no_guess,
            seed: args.seed,
        },
        opening_radius: args.opening_radius,
        max_cycles: args.max_cycles,
        ..BotConfig::default()
    };

    let result = Bot::new(dims, config, ScriptedSource::new(boards), LogActuator)
        .and_then(|mut bot| bot.run());
    match result {
        Ok(report) => {
            if let Some(pos) = report.opening {
                println!("Opened at {pos}");
            }
            println!(
                "{} after {} cycles and {} moves",
                report.outcome, report.cycles, report.moves
            );
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
