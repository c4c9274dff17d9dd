//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses raw puzzle input into the data shared by every part of a day.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// assert_eq!(Depths::parse("199\n200").unwrap(), vec![199, 200]);
/// ```
pub trait AocParser {
    /// The parsed input, plus any intermediate results parts want to share.
    ///
    /// Owned types are the common case; borrow from `'a` when the raw input
    /// can be used as-is.
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Implement once per part and let `#[derive(AocSolver)]` generate the
/// [`Solver`] dispatch over them.
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(depths: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(depths.windows(2).filter(|w| w[1] > w[0]).count().to_string())
///     }
/// }
///
/// let mut depths = Depths::parse("199\n200\n208\n200").unwrap();
/// assert_eq!(<Depths as PartSolver<1>>::solve(&mut depths).unwrap(), "2");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part, returning the answer as it should be printed.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete solver for one puzzle day.
///
/// Usually derived: `#[derive(AocSolver)]` with `#[aoc_solver(max_parts = 2)]`
/// routes `solve_part(shared, n)` to `<Self as PartSolver<n>>::solve`.
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem
    ///
    /// Returns `SolveError::PartNotImplemented` for part numbers the solver
    /// has no implementation for.
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked access to [`Solver::solve_part`].
pub trait SolverExt: Solver {
    /// Like `solve_part`, but rejects parts outside `1..=PARTS` with
    /// `SolveError::PartOutOfRange` before dispatching.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
