//! Error types for the runner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    /// Reading the input or writing the answers failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Lookup, parse or solve failure
    #[error("{0}")]
    Solver(#[from] aoc_solver::SolverError),

    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),
}

impl From<aoc_solver::SolveError> for RunnerError {
    fn from(err: aoc_solver::SolveError) -> Self {
        Self::Solver(err.into())
    }
}
