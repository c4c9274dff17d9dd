//! Stdin-to-stdout shell around the registered solvers
//!
//! Each binary reads the whole puzzle input from stdin, looks its day up in
//! a registry built from the linked solver plugins and prints one
//! `Part one: …` / `Part two: …` line per part. Diagnostics go to stderr
//! through `tracing`.

mod error;
pub mod logging;
pub mod output;

// Link aoc-2021 so its solver plugins are collected
use aoc_2021 as _;

use std::io::{self, Read, Write};
use std::process::ExitCode;

use aoc_solver::SolverRegistryBuilder;
use tracing::info;

pub use error::RunnerError;
use output::{format_duration, part_label};

/// Solve every part of `year`/`day` for the text read from `input`,
/// writing one labelled answer line per part to `output`.
pub fn run<R: Read, W: Write>(
    year: u16,
    day: u8,
    mut input: R,
    mut output: W,
) -> Result<(), RunnerError> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;

    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == year && plugin.day == day)?
        .build();

    let mut solver = registry.create_solver(year, day, &text)?;
    info!(year, day, parse = %format_duration(solver.parse_duration()), "parsed input");

    for part in 1..=solver.parts() {
        let result = solver.solve(part)?;
        info!(year, day, part, solve = %format_duration(result.duration()), "solved");
        writeln!(output, "{}: {}", part_label(part), result.answer)?;
    }
    output.flush()?;
    Ok(())
}

/// Entry point shared by the day binaries
pub fn main_for(year: u16, day: u8) -> ExitCode {
    logging::init();

    match run(year, day, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
