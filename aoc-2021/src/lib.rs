//! Advent of Code 2021 solutions with automatic registration
//!
//! Each day module holds its engine and a unit `Solver` deriving
//! `AutoRegisterSolver`, so linking this crate is enough for its solvers to
//! show up in `SolverRegistryBuilder::register_all_plugins`.
//!
//! - [`year_2021::day_16`]: BITS packet decoder and expression evaluator
//! - [`year_2021::day_22`]: reactor reboot over a disjoint cover of cuboids

pub mod year_2021;
