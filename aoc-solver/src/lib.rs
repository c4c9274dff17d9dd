//! Advent of Code Solver Library
//!
//! A small, type-safe framework for puzzle solvers. Each day parses its input
//! once into shared data and answers one or more parts against it.
//!
//! # Overview
//!
//! - [`AocParser`] turns raw input into the day's shared data
//! - [`PartSolver<N>`] answers part `N`
//! - [`Solver`] ties the parts together (derive it with `#[derive(AocSolver)]`)
//! - [`SolverRegistry`] maps (year, day) to solver factories, filled by hand or
//!   from plugins submitted with `#[derive(AutoRegisterSolver)]`
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 1)]
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(depths: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(depths.windows(2).filter(|w| w[1] > w[0]).count().to_string())
//!     }
//! }
//!
//! let registry = aoc_solver::RegisterableSolver::register_with(
//!     &Depths,
//!     SolverRegistryBuilder::new(),
//!     2021,
//!     1,
//! )
//! .unwrap()
//! .build();
//!
//! let mut solver = registry.create_solver(2021, 1, "199\n200\n208\n200").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "2");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-exported for the code generated by `AutoRegisterSolver`
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
