use std::fmt;

use anyhow::{Context, anyhow, bail};
use regex::Regex;

use super::box3::Box3;
use super::vector::Vector3;

const INSTRUCTION_PATTERN: &str =
    r"^(on|off) x=(-?\d+)\.\.(-?\d+),y=(-?\d+)\.\.(-?\d+),z=(-?\d+)\.\.(-?\d+)$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Switch {
    On,
    Off,
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Switch::On => f.write_str("on"),
            Switch::Off => f.write_str("off"),
        }
    }
}

/// One reboot step: turn every cube in `region` on or off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub switch: Switch,
    pub region: Box3,
}

impl Instruction {
    pub fn new(switch: Switch, region: Box3) -> Self {
        Self { switch, region }
    }

    pub fn on(region: Box3) -> Self {
        Self::new(Switch::On, region)
    }

    pub fn off(region: Box3) -> Self {
        Self::new(Switch::Off, region)
    }

    /// The same step restricted to `bounds`, or `None` when it touches
    /// nothing inside them.
    pub fn clip(&self, bounds: &Box3) -> Option<Instruction> {
        self.region
            .intersection(bounds)
            .map(|region| Instruction::new(self.switch, region))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.switch, self.region)
    }
}

/// Parses `on x=-20..26,y=-36..17,z=-47..7` lines
pub struct InstructionParser {
    pattern: Regex,
}

impl InstructionParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(INSTRUCTION_PATTERN)?,
        })
    }

    pub fn parse_line(&self, line: &str) -> anyhow::Result<Instruction> {
        let caps = self
            .pattern
            .captures(line.trim())
            .ok_or_else(|| anyhow!("expected `on|off x=a..b,y=c..d,z=e..f`, got {line:?}"))?;

        let switch = match &caps[1] {
            "on" => Switch::On,
            _ => Switch::Off,
        };

        let mut bounds = [0i64; 6];
        for (i, bound) in bounds.iter_mut().enumerate() {
            let text = &caps[i + 2];
            *bound = text
                .parse()
                .with_context(|| format!("coordinate {text} does not fit in 64 bits"))?;
        }

        for (axis, pair) in ["x", "y", "z"].iter().zip(bounds.chunks_exact(2)) {
            if pair[1] < pair[0] {
                bail!("{axis} range {}..{} is reversed", pair[0], pair[1]);
            }
        }

        let [x0, x1, y0, y1, z0, z1] = bounds;
        let region = Box3::new(Vector3::new(x0, y0, z0), Vector3::new(x1, y1, z1));
        if region.volume().is_none() {
            bail!("region {region} holds more cubes than fit in 64 bits");
        }
        Ok(Instruction::new(switch, region))
    }

    /// Parse every non-blank line in order.
    pub fn parse(&self, input: &str) -> anyhow::Result<Vec<Instruction>> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                self.parse_line(line)
                    .map_err(|e| anyhow!("(line {}) {:#}", idx + 1, e))
            })
            .collect()
    }
}
