use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

/// Counts set bits in a hex string
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2034, day = 25, tags = ["macro-test", "bits"])]
pub struct PopCount;

impl AocParser for PopCount {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let input = input.trim();
        if input.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(input)
        } else {
            Err(ParseError::InvalidFormat("expected hex digits".into()))
        }
    }
}

impl PartSolver<1> for PopCount {
    fn solve(hex: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let ones: u32 = hex
            .chars()
            .filter_map(|c| c.to_digit(16))
            .map(u32::count_ones)
            .sum();
        Ok(ones.to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2034, day = 24)]
pub struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl PartSolver<1> for Untagged {
    fn solve(_: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok("one".into())
    }
}

impl PartSolver<2> for Untagged {
    fn solve(_: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok("two".into())
    }
}

#[test]
fn plugins_are_collected_with_metadata() {
    let plugin = aoc_solver::inventory::iter::<aoc_solver::SolverPlugin>()
        .find(|p| p.year == 2034 && p.day == 25)
        .expect("PopCount should be registered");
    assert_eq!(plugin.tags, &["macro-test", "bits"]);
    assert_eq!(plugin.solver.parts(), 1);
}

#[test]
fn tag_filter_selects_only_tagged_plugins() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|p| p.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    assert!(registry.contains(2034, 25));
    assert!(!registry.contains(2034, 24));

    let mut solver = registry.create_solver(2034, 25, "F0A\n").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "6");
}

#[test]
fn registered_solver_answers_every_part() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|p| p.year == 2034 && p.day == 24)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2034, 24, "").unwrap();
    let answers: Vec<_> = (1..=solver.parts())
        .map(|part| solver.solve(part).unwrap().answer)
        .collect();
    assert_eq!(answers, ["one", "two"]);
}
