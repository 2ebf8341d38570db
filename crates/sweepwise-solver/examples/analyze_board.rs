//! Example showing every stage of the engine on a single board.
//!
//! This example shows how to:
//! - Parse a board from text
//! - Build constraints and split them into components
//! - Run the constraint search and inspect each component's outcome
//! - Score covered cells with the probability estimator
//! - Run one engine cycle
//!
//! # Usage
//!
//! ```sh
//! cargo run --example analyze_board -- board.txt
//! ```
//!
//! Read the board from standard input and tighten the search limits:
//!
//! ```sh
//! cargo run --example analyze_board -- --max-variables 20 --solution-cap 100 < board.txt
//! ```

use std::{
    fs,
    io::{self, Read as _},
    path::PathBuf,
    process,
};

use clap::Parser;
use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use sweepwise_core::Board;
use sweepwise_solver::{
    ConstraintSet, CspConfig, CspSolver, Engine, EngineConfig, ProbabilityEstimator, Session,
    decompose,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board file; reads standard input when omitted.
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Skip components with more variables than this.
    #[arg(long, value_name = "COUNT", default_value_t = 50)]
    max_variables: usize,

    /// Give up on a component after this many solutions.
    #[arg(long, value_name = "COUNT", default_value_t = 1000)]
    solution_cap: usize,

    /// Seed for guesses.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let text = match read_input(args.path.as_ref()) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Failed to read board: {err}");
            process::exit(1);
        }
    };
    let board: Board = match text.parse() {
        Ok(board) => board,
        Err(err) => {
            eprintln!("Invalid board: {err}");
            process::exit(1);
        }
    };

    println!("Board ({}):", board.dims());
    println!("{board}");
    println!();

    let set = ConstraintSet::from_board(&board);
    let components = decompose(&set);
    println!(
        "{} constraints, {} variables, {} components",
        set.len(),
        set.variables().count(),
        components.len()
    );

    let csp_config = CspConfig {
        max_variables: args.max_variables,
        solution_cap: args.solution_cap,
        ..CspConfig::default()
    };
    let solver = match CspSolver::new(csp_config.clone()) {
        Ok(solver) => solver,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };
    let report = solver.solve(components.clone());
    for (component, outcome) in components.iter().zip(report.outcomes()) {
        println!(
            "  {} variables starting at {}: {outcome:?}",
            component.variables().len(),
            component.variables()[0]
        );
    }
    println!("Certain mines: {:?}", report.mines());
    println!("Certain safes: {:?}", report.safes());
    println!();

    let estimator = ProbabilityEstimator::new();
    let scores = estimator.scores(&board);
    if !scores.is_empty() {
        println!("Scores:");
        for (pos, score) in &scores {
            println!("  {pos}: {score:.3}");
        }
    }
    let mut rng = Pcg64::seed_from_u64(args.seed);
    match estimator.guess(&board, &mut rng) {
        Some(guess) => println!("Best guess: {} ({:?})", guess.pos, guess.basis),
        None => println!("No covered cells"),
    }
    println!();

    let config = EngineConfig {
        csp: csp_config,
        seed: Some(args.seed),
        ..EngineConfig::default()
    };
    let result = Engine::new(board.dims(), config)
        .and_then(|mut engine| engine.decide(&board, &mut Session::new()));
    match result {
        Ok(decision) => println!("Engine decision: {decision:?}"),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
