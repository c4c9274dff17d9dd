//! Day 16: decode a BITS transmission from stdin

use std::process::ExitCode;

fn main() -> ExitCode {
    aoc_runner::main_for(2021, 16)
}
