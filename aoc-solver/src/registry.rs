//! Solver registry for looking up and creating solver instances

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

// ============================================================================
// Storage Constants and Index Calculation
// ============================================================================

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Number of years the flat storage can hold (2015-2034)
pub const MAX_YEARS: usize = 20;
/// Days per Advent of Code year
pub const DAYS_PER_YEAR: usize = 25;
/// Total capacity of the flat storage
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if year < BASE_YEAR || year >= BASE_YEAR + MAX_YEARS as u16 {
        return None;
    }
    if day == 0 || day > DAYS_PER_YEAR as u8 {
        return None;
    }
    let y = (year - BASE_YEAR) as usize;
    let d = (day - 1) as usize;
    Some(y * DAYS_PER_YEAR + d)
}

#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

// ============================================================================
// Factories
// ============================================================================

/// Creates a solver instance by parsing the given input
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    /// Number of parts the solver supports
    pub parts: u8,
}

struct SolverFactoryEntry {
    factory: SolverFactory,
    parts: u8,
}

/// Builder for an immutable [`SolverRegistry`].
///
/// Rejects duplicate and out-of-range registrations.
///
/// ```
/// use aoc_solver::{DynSolver, ParseError, RegistrationError, SolverRegistryBuilder};
///
/// fn unfinished(_: &str) -> Result<Box<dyn DynSolver + '_>, ParseError> {
///     Err(ParseError::Other("not written yet".into()))
/// }
///
/// let builder = SolverRegistryBuilder::new()
///     .register(2021, 16, 2, unfinished)
///     .unwrap();
/// let err = builder.register(2021, 16, 2, unfinished).err().unwrap();
/// assert!(matches!(err, RegistrationError::DuplicateSolver(2021, 16)));
/// ```
pub struct SolverRegistryBuilder {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl SolverRegistryBuilder {
    /// Create a new empty builder with pre-allocated storage
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Register a factory for `year`/`day` supporting `parts` parts.
    pub fn register<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;

        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }

        self.entries[index] = Some(SolverFactoryEntry {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Register every plugin submitted through `inventory::submit!`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the plugins for which `filter` returns `true`.
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.year == 2021 && plugin.day == 22)
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    /// Finalize the builder
    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            entries: self.entries,
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable lookup table from (year, day) to solver factories
pub struct SolverRegistry {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl SolverRegistry {
    /// Parse `input` with the solver registered for `year`/`day`.
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;

        let entry = self
            .entries
            .get(index)
            .and_then(|e| e.as_ref())
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }

    /// Metadata for a registered solver
    pub fn info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        calc_index(year, day)
            .and_then(|i| self.entries.get(i)?.as_ref())
            .map(|e| FactoryInfo {
                year,
                day,
                parts: e.parts,
            })
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.info(year, day).is_some()
    }

    /// Metadata for every registered solver, ordered by year then day
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                FactoryInfo {
                    year,
                    day,
                    parts: e.parts,
                }
            })
        })
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }
}

// ============================================================================
// Plugins
// ============================================================================

/// Object-safe registration hook, implemented for every [`Solver`].
///
/// `Solver` has associated types and can't be stored behind `dyn`; this
/// trait can, which is what lets `SolverPlugin` hold any solver.
pub trait RegisterableSolver: Sync {
    /// Register this solver type with `builder` for `year`/`day`
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    /// Number of parts the solver supports
    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register(year, day, S::PARTS, move |input: &str| {
            let instance = SolverInstance::<S>::new(year, day, input)?;
            Ok(Box::new(instance))
        })
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// A solver submitted for automatic registration.
///
/// Normally produced by `#[derive(AutoRegisterSolver)]`; can also be
/// submitted by hand with `inventory::submit!`.
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    /// The solver (type-erased)
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form tags for filtering (e.g. "bits", "geometry")
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_every_slot() {
        for index in 0..CAPACITY {
            let (year, day) = from_index(index);
            assert_eq!(calc_index(year, day), Some(index));
        }
    }

    #[test]
    fn index_rejects_out_of_range() {
        assert_eq!(calc_index(2014, 1), None);
        assert_eq!(calc_index(2035, 1), None);
        assert_eq!(calc_index(2021, 0), None);
        assert_eq!(calc_index(2021, 26), None);
    }

    #[test]
    fn register_rejects_invalid_day() {
        let result = SolverRegistryBuilder::new()
            .register(2021, 26, 2, stub);
        assert!(matches!(result, Err(RegistrationError::InvalidYearDay(2021, 26))));
    }

    #[test]
    fn create_solver_reports_missing_and_invalid() {
        let registry = SolverRegistryBuilder::new().build();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.create_solver(2021, 16, ""),
            Err(SolverError::NotFound(2021, 16))
        ));
        assert!(matches!(
            registry.create_solver(1999, 16, ""),
            Err(SolverError::InvalidYearDay(1999, 16))
        ));
    }

    fn stub(_: &str) -> Result<Box<dyn DynSolver + '_>, ParseError> {
        Err(ParseError::Other("unused".into()))
    }

    #[test]
    fn iter_info_is_ordered() {
        let registry = SolverRegistryBuilder::new()
            .register(2021, 22, 2, stub)
            .unwrap()
            .register(2021, 16, 1, stub)
            .unwrap()
            .build();

        let infos: Vec<_> = registry.iter_info().collect();
        assert_eq!(
            infos,
            vec![
                FactoryInfo { year: 2021, day: 16, parts: 1 },
                FactoryInfo { year: 2021, day: 22, parts: 2 },
            ]
        );
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(2021, 22));
    }
}
