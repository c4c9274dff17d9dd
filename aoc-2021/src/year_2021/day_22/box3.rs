//! Axis-aligned integer boxes with inclusive bounds

use std::fmt;
use std::iter;
use std::ops::RangeInclusive;

use super::vector::{Axis, Vector3};

/// The grid cells `min..=max` on every axis.
///
/// A box with `max < min` on any axis is empty; constructors normalize every
/// empty box to [`Box3::EMPTY`], so empty boxes compare equal. Operations
/// return new boxes and never modify their operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Box3 {
    min: Vector3,
    max: Vector3,
}

impl Box3 {
    pub const EMPTY: Box3 = Box3 {
        min: Vector3::splat(i64::MAX),
        max: Vector3::splat(i64::MIN),
    };

    pub fn new(min: Vector3, max: Vector3) -> Self {
        let candidate = Self { min, max };
        if candidate.is_empty() {
            Self::EMPTY
        } else {
            candidate
        }
    }

    pub fn from_ranges(
        x: RangeInclusive<i64>,
        y: RangeInclusive<i64>,
        z: RangeInclusive<i64>,
    ) -> Self {
        Self::new(
            Vector3::new(*x.start(), *y.start(), *z.start()),
            Vector3::new(*x.end(), *y.end(), *z.end()),
        )
    }

    pub fn min(&self) -> Vector3 {
        self.min
    }

    pub fn max(&self) -> Vector3 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        Axis::ALL
            .iter()
            .any(|&axis| self.max.get(axis) < self.min.get(axis))
    }

    /// Number of cells along each axis, or `None` when an extent does not
    /// fit in an `i64`
    pub fn size(&self) -> Option<Vector3> {
        if self.is_empty() {
            return Some(Vector3::default());
        }
        let extent = |axis: Axis| {
            self.max
                .get(axis)
                .checked_sub(self.min.get(axis))?
                .checked_add(1)
        };
        Some(Vector3::new(
            extent(Axis::X)?,
            extent(Axis::Y)?,
            extent(Axis::Z)?,
        ))
    }

    /// Number of cells in the box, or `None` when the count overflows
    pub fn volume(&self) -> Option<i64> {
        self.size()?.checked_product()
    }

    pub fn contains_point(&self, point: Vector3) -> bool {
        Axis::ALL.iter().all(|&axis| {
            self.min.get(axis) <= point.get(axis) && point.get(axis) <= self.max.get(axis)
        })
    }

    /// Whether every cell of `other` is in `self`. The empty box is contained
    /// in everything.
    pub fn contains_box(&self, other: &Box3) -> bool {
        other.is_empty()
            || Axis::ALL.iter().all(|&axis| {
                self.min.get(axis) <= other.min.get(axis)
                    && other.max.get(axis) <= self.max.get(axis)
            })
    }

    /// Whether the two boxes share at least one cell
    pub fn intersects(&self, other: &Box3) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && Axis::ALL.iter().all(|&axis| {
                other.max.get(axis) >= self.min.get(axis)
                    && other.min.get(axis) <= self.max.get(axis)
            })
    }

    /// The shared cells, or [`Box3::EMPTY`]
    pub fn intersect(&self, other: &Box3) -> Box3 {
        Box3::new(
            self.min.component_max(other.min),
            self.max.component_min(other.max),
        )
    }

    pub fn intersection(&self, other: &Box3) -> Option<Box3> {
        let shared = self.intersect(other);
        (!shared.is_empty()).then_some(shared)
    }

    /// Smallest box containing both
    pub fn bounding_union(&self, other: &Box3) -> Box3 {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Box3::new(
            self.min.component_min(other.min),
            self.max.component_max(other.max),
        )
    }

    pub fn translate(&self, offset: Vector3) -> Box3 {
        if self.is_empty() {
            return Self::EMPTY;
        }
        Box3::new(self.min + offset, self.max + offset)
    }

    /// Grow by `by` cells on every side; negative values shrink.
    pub fn expand(&self, by: i64) -> Box3 {
        if self.is_empty() {
            return Self::EMPTY;
        }
        let by = Vector3::splat(by);
        Box3::new(self.min - by, self.max + by)
    }

    /// Partition `self` along the faces of `other`.
    ///
    /// Each axis is cut just below `other.min` and just above `other.max`
    /// when that plane falls inside `self`, giving between 1 and 27 disjoint
    /// fragments whose union is exactly `self`. Every fragment lies either
    /// inside or outside `other`'s extent on each axis.
    pub fn split(&self, other: &Box3) -> Vec<Box3> {
        if self.is_empty() {
            return Vec::new();
        }
        if other.is_empty() {
            return vec![*self];
        }

        let mut fragments = vec![*self];
        for axis in Axis::ALL {
            let below = Some(other.min.get(axis));
            let above = other.max.get(axis).checked_add(1);
            fragments = fragments
                .into_iter()
                .flat_map(|f| f.cut(axis, below))
                .flat_map(|f| f.cut(axis, above))
                .collect();
        }
        fragments
    }

    /// The cells of `self` outside `other`, as disjoint boxes.
    ///
    /// A box disjoint from `other` comes back whole; a box inside it
    /// vanishes.
    pub fn subtract(&self, other: &Box3) -> Vec<Box3> {
        if !self.intersects(other) {
            return if self.is_empty() { Vec::new() } else { vec![*self] };
        }
        self.split(other)
            .into_iter()
            .filter(|fragment| !other.contains_box(fragment))
            .collect()
    }

    /// The union of both boxes as disjoint boxes: `self`, then the parts of
    /// `other` outside it.
    pub fn join(&self, other: &Box3) -> Vec<Box3> {
        let mut joined = if self.is_empty() { Vec::new() } else { vec![*self] };
        joined.extend(other.subtract(self));
        joined
    }

    // Split into the cells before `at` and the cells from `at` on. No cut
    // unless both halves are non-empty.
    fn cut(self, axis: Axis, at: Option<i64>) -> impl Iterator<Item = Box3> {
        let pieces = match at {
            Some(at) if self.min.get(axis) < at && at <= self.max.get(axis) => (
                Box3 {
                    min: self.min,
                    max: self.max.with(axis, at - 1),
                },
                Some(Box3 {
                    min: self.min.with(axis, at),
                    max: self.max,
                }),
            ),
            _ => (self, None),
        };
        iter::once(pieces.0).chain(pieces.1)
    }
}

impl fmt::Display for Box3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        write!(
            f,
            "x={}..{},y={}..{},z={}..{}",
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use proptest::prelude::*;

    fn cube(lo: i64, hi: i64) -> Box3 {
        Box3::from_ranges(lo..=hi, lo..=hi, lo..=hi)
    }

    fn total_volume(boxes: &[Box3]) -> i64 {
        boxes.iter().map(|b| b.volume().unwrap()).sum()
    }

    fn pairwise_disjoint(boxes: &[Box3]) -> bool {
        boxes.iter().tuple_combinations().all(|(a, b)| !a.intersects(b))
    }

    #[test]
    fn volume_counts_boundary_cells() {
        assert_eq!(cube(10, 12).volume(), Some(27));
        assert_eq!(cube(0, 0).volume(), Some(1));
        assert_eq!(
            Box3::from_ranges(-2..=2, 0..=0, 5..=6).size(),
            Some(Vector3::new(5, 1, 2))
        );
    }

    #[test]
    fn volume_overflow_is_none() {
        assert_eq!(cube(0, 3_000_000).volume(), None);
        assert_eq!(cube(0, 2_000_000).volume(), Some(2_000_001i64.pow(3)));
        let widest = Box3::from_ranges(i64::MIN..=i64::MAX, 0..=0, 0..=0);
        assert_eq!(widest.size(), None);
        assert_eq!(widest.volume(), None);
    }

    #[test]
    fn reversed_bounds_normalize_to_empty() {
        let reversed = Box3::from_ranges(0..=3, 5..=4, 0..=3);
        assert_eq!(reversed, Box3::EMPTY);
        assert!(reversed.is_empty());
        assert_eq!(reversed.volume(), Some(0));
        assert_eq!(cube(0, 2).expand(-2), Box3::EMPTY);
        assert_eq!(Box3::EMPTY.to_string(), "empty");
    }

    #[test]
    fn intersection_of_touching_and_disjoint_boxes() {
        assert_eq!(cube(0, 2).intersection(&cube(2, 4)), Some(cube(2, 2)));
        assert_eq!(cube(0, 2).intersection(&cube(3, 4)), None);
        assert_eq!(cube(0, 2).intersect(&cube(3, 4)), Box3::EMPTY);
        assert!(!Box3::EMPTY.intersects(&Box3::EMPTY));
    }

    #[test]
    fn containment() {
        let outer = cube(0, 4);
        assert!(outer.contains_box(&cube(1, 3)));
        assert!(outer.contains_box(&outer));
        assert!(!outer.contains_box(&cube(3, 5)));
        assert!(outer.contains_box(&Box3::EMPTY));
        assert!(outer.contains_point(Vector3::new(4, 0, 2)));
        assert!(!outer.contains_point(Vector3::new(5, 0, 2)));
    }

    #[test]
    fn translate_and_bounding_union() {
        assert_eq!(cube(0, 1).translate(Vector3::splat(3)), cube(3, 4));
        assert_eq!(cube(0, 1).bounding_union(&cube(5, 6)), cube(0, 6));
        assert_eq!(Box3::EMPTY.bounding_union(&cube(5, 6)), cube(5, 6));
        assert_eq!(cube(1, 2).expand(1), cube(0, 3));
    }

    #[test]
    fn split_around_a_centre_cell() {
        let fragments = cube(0, 2).split(&cube(1, 1));
        assert_eq!(fragments.len(), 27);
        assert!(fragments.iter().all(|f| f.volume() == Some(1)));
    }

    #[test]
    fn split_without_interior_planes_is_a_no_op() {
        assert_eq!(cube(0, 2).split(&cube(0, 2)), vec![cube(0, 2)]);
        assert_eq!(cube(0, 2).split(&cube(-5, 10)), vec![cube(0, 2)]);
        assert_eq!(cube(0, 2).split(&cube(7, 9)), vec![cube(0, 2)]);
    }

    #[test]
    fn split_on_one_plane() {
        let slab = Box3::from_ranges(2..=5, -10..=10, -10..=10);
        let fragments = cube(0, 2).split(&slab);
        assert_eq!(
            fragments,
            vec![
                Box3::from_ranges(0..=1, 0..=2, 0..=2),
                Box3::from_ranges(2..=2, 0..=2, 0..=2),
            ]
        );
    }

    #[test]
    fn subtract_overlapping_corner() {
        let remainder = cube(10, 12).subtract(&cube(9, 11));
        assert_eq!(total_volume(&remainder), 19);
        assert!(pairwise_disjoint(&remainder));
        assert!(remainder.iter().all(|f| !f.intersects(&cube(9, 11))));
    }

    #[test]
    fn subtract_disjoint_and_identical() {
        assert_eq!(cube(0, 2).subtract(&cube(5, 6)), vec![cube(0, 2)]);
        assert!(cube(0, 2).subtract(&cube(0, 2)).is_empty());
        assert!(cube(1, 1).subtract(&cube(0, 2)).is_empty());
        assert!(Box3::EMPTY.subtract(&cube(0, 2)).is_empty());
    }

    #[test]
    fn join_covers_both_once() {
        let joined = cube(0, 2).join(&cube(1, 3));
        assert_eq!(total_volume(&joined), 27 + 27 - 8);
        assert!(pairwise_disjoint(&joined));
        assert_eq!(joined[0], cube(0, 2));
        assert_eq!(Box3::EMPTY.join(&cube(0, 1)), vec![cube(0, 1)]);
    }

    prop_compose! {
        fn any_box()(
            x in -8i64..8, y in -8i64..8, z in -8i64..8,
            dx in 0i64..6, dy in 0i64..6, dz in 0i64..6,
        ) -> Box3 {
            Box3::new(Vector3::new(x, y, z), Vector3::new(x + dx, y + dy, z + dz))
        }
    }

    proptest! {
        #[test]
        fn split_partitions_self(a in any_box(), b in any_box()) {
            let fragments = a.split(&b);
            prop_assert!(!fragments.is_empty() && fragments.len() <= 27);
            prop_assert_eq!(total_volume(&fragments), a.volume().unwrap());
            prop_assert!(pairwise_disjoint(&fragments));
            prop_assert!(fragments.iter().all(|f| a.contains_box(f) && !f.is_empty()));
        }

        #[test]
        fn subtract_removes_exactly_the_overlap(a in any_box(), b in any_box()) {
            let remainder = a.subtract(&b);
            prop_assert!(pairwise_disjoint(&remainder));
            prop_assert!(remainder.iter().all(|f| !b.contains_box(f) && !f.intersects(&b)));
            let overlap = a.intersect(&b).volume().unwrap();
            prop_assert_eq!(total_volume(&remainder) + overlap, a.volume().unwrap());
        }

        #[test]
        fn join_volume_is_inclusion_exclusion(a in any_box(), b in any_box()) {
            let joined = a.join(&b);
            prop_assert!(pairwise_disjoint(&joined));
            prop_assert_eq!(
                total_volume(&joined),
                total_volume(&[a, b]) - a.intersect(&b).volume().unwrap()
            );
        }
    }
}
