//! The lit region of the reactor as a disjoint cover of boxes

use std::mem;

use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, trace};

use super::box3::Box3;
use super::instruction::{Instruction, Switch};

/// The lit cube count does not fit in an `i64`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("lit volume overflowed 64 bits")]
pub struct VolumeOverflow;

/// A set of pairwise non-overlapping boxes whose union is every lit cube.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reactor {
    cubes: Vec<Box3>,
}

impl Reactor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Light every cube in `region`.
    ///
    /// Only the parts of `region` not already lit are added, so the cover
    /// stays disjoint.
    pub fn add(&mut self, region: Box3) {
        if region.is_empty() {
            return;
        }
        let mut pieces = vec![region];
        for lit in &self.cubes {
            if pieces.is_empty() {
                return;
            }
            if !pieces.iter().any(|piece| piece.intersects(lit)) {
                continue;
            }
            pieces = pieces
                .into_iter()
                .flat_map(|piece| piece.subtract(lit))
                .collect();
        }
        trace!(added = pieces.len(), "new fragments");
        self.cubes.extend(pieces);
    }

    /// Turn off every cube in `region`.
    pub fn remove(&mut self, region: Box3) {
        if region.is_empty() {
            return;
        }
        let before = self.cubes.len();
        self.cubes = mem::take(&mut self.cubes)
            .into_iter()
            .flat_map(|lit| lit.subtract(&region))
            .collect();
        trace!(before, after = self.cubes.len(), "cover after removal");
    }

    pub fn apply(&mut self, instruction: &Instruction) {
        match instruction.switch {
            Switch::On => self.add(instruction.region),
            Switch::Off => self.remove(instruction.region),
        }
        debug!(%instruction, boxes = self.cubes.len(), "applied");
    }

    /// Number of lit cubes
    pub fn volume(&self) -> Result<i64, VolumeOverflow> {
        self.cubes.iter().try_fold(0i64, |total, lit| {
            lit.volume()
                .and_then(|v| total.checked_add(v))
                .ok_or(VolumeOverflow)
        })
    }

    pub fn boxes(&self) -> &[Box3] {
        &self.cubes
    }

    /// Number of boxes in the cover, not cubes
    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    pub fn is_disjoint(&self) -> bool {
        self.cubes
            .iter()
            .tuple_combinations()
            .all(|(a, b)| !a.intersects(b))
    }
}

impl<'a> Extend<&'a Instruction> for Reactor {
    fn extend<I: IntoIterator<Item = &'a Instruction>>(&mut self, iter: I) {
        for instruction in iter {
            self.apply(instruction);
        }
    }
}

/// Lit volume after running `instructions` in order, optionally restricted
/// to `bounds`.
pub fn total_on_volume(
    instructions: &[Instruction],
    bounds: Option<&Box3>,
) -> Result<i64, VolumeOverflow> {
    let mut reactor = Reactor::new();
    match bounds {
        Some(bounds) => {
            let clipped: Vec<_> = instructions.iter().filter_map(|i| i.clip(bounds)).collect();
            reactor.extend(&clipped);
        }
        None => reactor.extend(instructions),
    }
    reactor.volume()
}

/// Lit volume computed by signed overlap counting instead of a disjoint
/// cover.
///
/// Every step cancels its overlap with each recorded region by adding that
/// overlap with the opposite sign; `on` steps then record their own region.
/// The region list can grow quickly, so this is meant for small inputs.
pub fn inclusion_exclusion_volume(instructions: &[Instruction]) -> Result<i64, VolumeOverflow> {
    let mut signed: Vec<(Box3, i64)> = Vec::new();
    for instruction in instructions {
        let overlaps: Vec<_> = signed
            .iter()
            .filter_map(|(region, sign)| {
                region
                    .intersection(&instruction.region)
                    .map(|shared| (shared, -sign))
            })
            .collect();
        signed.extend(overlaps);
        if instruction.switch == Switch::On && !instruction.region.is_empty() {
            signed.push((instruction.region, 1));
        }
    }
    signed.iter().try_fold(0i64, |total, (region, sign)| {
        region
            .volume()
            .and_then(|v| v.checked_mul(*sign))
            .and_then(|v| total.checked_add(v))
            .ok_or(VolumeOverflow)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2021::day_22::vector::Vector3;
    use proptest::prelude::*;
    use std::collections::HashSet;

    const SMALL_EXAMPLE: &str = "\
on x=10..12,y=10..12,z=10..12
on x=11..13,y=11..13,z=11..13
off x=9..11,y=9..11,z=9..11
on x=10..10,y=10..10,z=10..10";

    fn cube(lo: i64, hi: i64) -> Box3 {
        Box3::from_ranges(lo..=hi, lo..=hi, lo..=hi)
    }

    fn small_example() -> Vec<Instruction> {
        crate::year_2021::day_22::InstructionParser::new()
            .unwrap()
            .parse(SMALL_EXAMPLE)
            .unwrap()
    }

    #[test]
    fn on_then_off_leaves_nineteen() {
        let mut reactor = Reactor::new();
        reactor.apply(&Instruction::on(cube(10, 12)));
        reactor.apply(&Instruction::off(cube(9, 11)));
        assert_eq!(reactor.volume(), Ok(19));
        assert!(reactor.is_disjoint());
    }

    #[test]
    fn repeated_off_is_idempotent() {
        let mut reactor = Reactor::new();
        reactor.apply(&Instruction::on(cube(0, 9)));
        reactor.apply(&Instruction::off(cube(3, 5)));
        let once = reactor.clone();
        reactor.apply(&Instruction::off(cube(3, 5)));
        assert_eq!(reactor, once);
    }

    #[test]
    fn relighting_a_lit_region_adds_nothing() {
        let mut reactor = Reactor::new();
        reactor.add(cube(0, 4));
        reactor.add(cube(1, 3));
        assert_eq!(reactor.boxes(), &[cube(0, 4)]);
        assert_eq!(reactor.len(), 1);
    }

    #[test]
    fn removing_everything_empties_the_cover() {
        let mut reactor = Reactor::new();
        reactor.add(cube(0, 2));
        reactor.add(cube(5, 6));
        reactor.remove(cube(-10, 10));
        assert!(reactor.is_empty());
        assert_eq!(reactor.volume(), Ok(0));
    }

    #[test]
    fn small_example_has_thirty_nine_lit() {
        let steps = small_example();
        assert_eq!(total_on_volume(&steps, None), Ok(39));
        assert_eq!(inclusion_exclusion_volume(&steps), Ok(39));
    }

    #[test]
    fn bounded_volume_ignores_cubes_outside() {
        let bounds = cube(-50, 50);
        let steps = [
            Instruction::on(Box3::from_ranges(45..=54, 0..=0, 0..=0)),
            Instruction::on(cube(1000, 1001)),
        ];
        assert_eq!(total_on_volume(&steps, Some(&bounds)), Ok(6));
        assert_eq!(total_on_volume(&steps, None), Ok(18));
    }

    #[test]
    fn volume_past_i64_is_an_error() {
        let steps = [
            Instruction::on(cube(0, 2_000_000)),
            Instruction::on(Box3::from_ranges(3_000_000..=5_000_000, 0..=2_000_000, 0..=2_000_000)),
        ];
        assert_eq!(total_on_volume(&steps[..1], None), Ok(2_000_001i64.pow(3)));
        assert_eq!(total_on_volume(&steps, None), Err(VolumeOverflow));
        assert_eq!(inclusion_exclusion_volume(&steps), Err(VolumeOverflow));
        assert_eq!(total_on_volume(&steps, Some(&cube(-50, 50))), Ok(51 * 51 * 51));
    }

    fn brute_force(steps: &[Instruction]) -> usize {
        let mut lit = HashSet::new();
        for step in steps {
            let (min, max) = (step.region.min(), step.region.max());
            for x in min.x..=max.x {
                for y in min.y..=max.y {
                    for z in min.z..=max.z {
                        let cell = Vector3::new(x, y, z);
                        match step.switch {
                            Switch::On => lit.insert(cell),
                            Switch::Off => lit.remove(&cell),
                        };
                    }
                }
            }
        }
        lit.len()
    }

    prop_compose! {
        fn any_instruction()(
            on in any::<bool>(),
            x in -6i64..6, y in -6i64..6, z in -6i64..6,
            dx in 0i64..5, dy in 0i64..5, dz in 0i64..5,
        ) -> Instruction {
            let region = Box3::new(Vector3::new(x, y, z), Vector3::new(x + dx, y + dy, z + dz));
            if on { Instruction::on(region) } else { Instruction::off(region) }
        }
    }

    proptest! {
        #[test]
        fn cover_matches_cell_count(steps in prop::collection::vec(any_instruction(), 1..10)) {
            let mut reactor = Reactor::new();
            reactor.extend(&steps);
            prop_assert!(reactor.is_disjoint());
            prop_assert_eq!(reactor.volume(), Ok(brute_force(&steps) as i64));
            prop_assert_eq!(reactor.volume(), inclusion_exclusion_volume(&steps));
        }
    }
}
