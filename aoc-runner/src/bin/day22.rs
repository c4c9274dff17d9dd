//! Day 22: reboot the reactor from the steps on stdin

use std::process::ExitCode;

fn main() -> ExitCode {
    aoc_runner::main_for(2021, 22)
}
