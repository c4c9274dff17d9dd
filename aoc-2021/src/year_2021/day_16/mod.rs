//! Day 16: Packet Decoder
//!
//! The transmission is a hex string encoding one BITS packet. Part one sums
//! the version numbers of every packet in the tree, part two evaluates it.

pub mod bit_reader;
pub mod hex;
pub mod packet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

pub use bit_reader::{BitError, BitReader, slice_to_u64};
pub use hex::{HexError, decode_hex};
pub use packet::{Operator, Packet, PacketError, Payload};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 16, tags = ["2021", "bits", "parsing"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Packet;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let bytes = decode_hex(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        if bytes.is_empty() {
            return Err(ParseError::MissingData("empty transmission".into()));
        }
        let packet = Packet::decode(bytes).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        debug!(packets = packet.iter().count(), "decoded transmission");
        Ok(packet)
    }
}

impl PartSolver<1> for Solver {
    fn solve(packet: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(packet.version_sum().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(packet: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        debug!(expression = %packet, "evaluating");
        packet
            .evaluate()
            .map(|value| value.to_string())
            .map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn solves_both_parts() {
        let mut packet = Solver::parse("C200B40A82\n").unwrap();
        assert_eq!(Solver::solve_part(&mut packet, 1).unwrap(), "14");
        assert_eq!(Solver::solve_part(&mut packet, 2).unwrap(), "3");
    }

    #[test]
    fn empty_input_is_missing_data() {
        assert!(matches!(Solver::parse("  \n"), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn bad_hex_is_invalid_format() {
        assert!(matches!(Solver::parse("XYZ0"), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn corrupt_packet_is_invalid_format() {
        assert!(matches!(Solver::parse("D2FE29"), Err(ParseError::InvalidFormat(_))));
    }
}
