//! Day 22: Reactor Reboot
//!
//! Each input line switches a cuboid of cubes on or off. Part one counts the
//! lit cubes inside the initialization region (`-50..=50` on every axis),
//! part two counts all of them.

pub mod box3;
pub mod instruction;
pub mod reactor;
pub mod vector;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

pub use box3::Box3;
pub use instruction::{Instruction, InstructionParser, Switch};
pub use reactor::{Reactor, VolumeOverflow, inclusion_exclusion_volume, total_on_volume};
pub use vector::{Axis, Vector3};

const INITIALIZATION_RADIUS: i64 = 50;

/// The cuboid part one is restricted to
pub fn initialization_region() -> Box3 {
    let r = INITIALIZATION_RADIUS;
    Box3::from_ranges(-r..=r, -r..=r, -r..=r)
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 22, tags = ["2021", "geometry", "set-algebra"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let parser = InstructionParser::new().map_err(|e| ParseError::Other(e.to_string()))?;
        let instructions = parser
            .parse(input)
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        if instructions.is_empty() {
            return Err(ParseError::MissingData("no reboot steps".into()));
        }
        debug!(steps = instructions.len(), "parsed reboot steps");
        Ok(instructions)
    }
}

impl PartSolver<1> for Solver {
    fn solve(instructions: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let bounds = initialization_region();
        total_on_volume(instructions, Some(&bounds))
            .map(|volume| volume.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(instructions: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_on_volume(instructions, None)
            .map(|volume| volume.to_string())
            .map_err(SolveError::failed)
    }
}
