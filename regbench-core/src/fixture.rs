//! Benchmark Fixture
//!
//! The hand-authored corpus every engine runs against: an ordered set of
//! patterns, an ordered set of inputs, and the grid of expected match
//! outcomes indexed by (pattern, input). A [`Fixture`] is validated once on
//! construction and is read-only afterwards, so it can be shared freely
//! between runner invocations and threads.

use crate::error::BenchError;
use serde::{Deserialize, Serialize};

/// URL match anchored at the start of the input
pub const URL_PATTERN: &str = r"^(([^:]+)://)?([^:/]+)(:([0-9]+))?(/.*)";
/// URL match without the leading anchor
pub const UNANCHORED_URL_PATTERN: &str = r"(([^:]+)://)?([^:/]+)(:([0-9]+))?(/.*)";
/// Canonical US dollar amount
pub const DOLLAR_PATTERN: &str = r"usd [+-]?[0-9]+.[0-9][0-9]";
/// Duplicate adjacent words (needs backreferences)
pub const DUPLICATE_WORDS_PATTERN: &str = r"\b(\w+)(\s+\1)+\b";
/// Brace-delimited block with a negative lookahead; slow on the block input
pub const BLOCK_PATTERN: &str = r"\{(\d+):(([^}](?!-} ))*)";

/// Recorded outcomes for the standard patterns, one row per pattern
const EXPECTED: [[bool; 6]; 4] = [
    [true, true, false, false, false, false],
    [true, true, false, false, false, false],
    [false, false, true, false, false, false],
    [false, false, false, false, true, false],
];

/// The block pattern only matches the block input
const BLOCK_EXPECTED: [bool; 6] = [false, false, false, false, false, true];

const BLOCK_LINE: &str = "this is some more text and some more and some more and even more\n";
const BLOCK_BODY_LINES: usize = 40;

/// The large brace-delimited block of text used as the last input.
pub fn block_text() -> String {
    let mut text = String::with_capacity(BLOCK_LINE.len() * (BLOCK_BODY_LINES + 2) + 16);
    text.push_str("{1:\n");
    text.push_str("this is some more text - and some more and some more and even more\n");
    for _ in 0..BLOCK_BODY_LINES {
        text.push_str(BLOCK_LINE);
    }
    text.push_str("this is some more text and some more and some more and even more at the end\n");
    text.push_str("-}\n");
    text
}

/// Ordered sequence of pattern strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet(Vec<String>);

impl PatternSet {
    /// Build a pattern set, preserving order
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(patterns.into_iter().map(Into::into).collect())
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no patterns
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pattern at `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Iterate patterns in fixture order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Ordered sequence of input texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSet(Vec<String>);

impl InputSet {
    /// Build an input set, preserving order
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(inputs.into_iter().map(Into::into).collect())
    }

    /// Number of inputs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no inputs
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Input at `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Iterate inputs in fixture order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Total size of all inputs in bytes
    pub fn total_bytes(&self) -> usize {
        self.0.iter().map(String::len).sum()
    }
}

/// Row-major boolean grid shared by expectations and observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGrid {
    patterns: usize,
    inputs: usize,
    cells: Vec<bool>,
}

impl MatchGrid {
    /// Create a grid with every cell set to "no match"
    pub fn new(patterns: usize, inputs: usize) -> Self {
        Self {
            patterns,
            inputs,
            cells: vec![false; patterns * inputs],
        }
    }

    /// Grid dimensions as (patterns, inputs)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.patterns, self.inputs)
    }

    /// Value of cell (pattern, input); out-of-range cells read as `false`
    pub fn get(&self, pattern: usize, input: usize) -> bool {
        if pattern >= self.patterns || input >= self.inputs {
            return false;
        }
        self.cells[pattern * self.inputs + input]
    }

    /// Set cell (pattern, input), failing if it lies outside the grid
    pub fn set(&mut self, pattern: usize, input: usize, value: bool) -> Result<(), BenchError> {
        if pattern >= self.patterns || input >= self.inputs {
            return Err(BenchError::Fixture(format!(
                "cell ({pattern}, {input}) is outside a {}x{} grid",
                self.patterns, self.inputs
            )));
        }
        self.cells[pattern * self.inputs + input] = value;
        Ok(())
    }

    /// Number of cells set to `true`
    pub fn count_matches(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Row for one pattern
    pub fn row(&self, pattern: usize) -> &[bool] {
        let start = pattern.min(self.patterns) * self.inputs;
        let end = (pattern + 1).min(self.patterns) * self.inputs;
        &self.cells[start..end]
    }
}

/// Expected match outcomes indexed by (pattern, input).
///
/// Unset cells mean "no match expected".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectationTable {
    grid: MatchGrid,
}

impl ExpectationTable {
    /// Create a table where no pattern is expected to match any input
    pub fn new(patterns: usize, inputs: usize) -> Self {
        Self {
            grid: MatchGrid::new(patterns, inputs),
        }
    }

    /// Build a table from the list of cells expected to match
    pub fn from_matches(
        patterns: usize,
        inputs: usize,
        matches: &[(usize, usize)],
    ) -> Result<Self, BenchError> {
        let mut table = Self::new(patterns, inputs);
        for &(pattern, input) in matches {
            table.grid.set(pattern, input, true)?;
        }
        Ok(table)
    }

    /// Build a table from fixed-width rows, one per pattern
    pub fn from_rows<const N: usize>(rows: &[[bool; N]]) -> Self {
        Self {
            grid: MatchGrid {
                patterns: rows.len(),
                inputs: N,
                cells: rows.iter().flatten().copied().collect(),
            },
        }
    }

    /// Whether pattern `pattern` is expected to match input `input`
    pub fn expects(&self, pattern: usize, input: usize) -> bool {
        self.grid.get(pattern, input)
    }

    /// Table dimensions as (patterns, inputs)
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// Underlying grid
    pub fn grid(&self) -> &MatchGrid {
        &self.grid
    }
}

/// A single cell where the observed result differs from the expectation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub pattern_index: usize,
    pub input_index: usize,
    pub pattern: String,
    pub expected: bool,
    pub observed: bool,
}

/// Validated, immutable benchmark corpus.
#[derive(Debug, Clone)]
pub struct Fixture {
    patterns: PatternSet,
    inputs: InputSet,
    expectations: ExpectationTable,
}

impl Fixture {
    /// Assemble a fixture, checking that the table covers exactly the sets
    pub fn new(
        patterns: PatternSet,
        inputs: InputSet,
        expectations: ExpectationTable,
    ) -> Result<Self, BenchError> {
        let (rows, cols) = expectations.dimensions();
        if rows != patterns.len() || cols != inputs.len() {
            return Err(BenchError::Fixture(format!(
                "expectation table is {rows}x{cols} but the fixture has {} patterns and {} inputs",
                patterns.len(),
                inputs.len()
            )));
        }
        if patterns.is_empty() || inputs.is_empty() {
            return Err(BenchError::Fixture(
                "at least one pattern and one input are required".to_string(),
            ));
        }
        Ok(Self {
            patterns,
            inputs,
            expectations,
        })
    }

    /// The standard corpus: four patterns against six inputs.
    pub fn standard() -> Self {
        Self::build(false)
    }

    /// The standard corpus plus the slow brace-block pattern as a fifth row.
    pub fn with_block_pattern() -> Self {
        Self::build(true)
    }

    fn build(include_block: bool) -> Self {
        let mut patterns = vec![
            URL_PATTERN,
            UNANCHORED_URL_PATTERN,
            DOLLAR_PATTERN,
            DUPLICATE_WORDS_PATTERN,
        ];
        let mut rows = EXPECTED.to_vec();
        if include_block {
            patterns.push(BLOCK_PATTERN);
            rows.push(BLOCK_EXPECTED);
        }

        Self {
            patterns: PatternSet::new(patterns),
            inputs: InputSet::new([
                "http://www.linux.com/".to_string(),
                "http://www.thelinuxshow.com/main.php3".to_string(),
                "usd 1234.00".to_string(),
                "he said she said he said no".to_string(),
                "same same same".to_string(),
                block_text(),
            ]),
            expectations: ExpectationTable::from_rows(&rows),
        }
    }

    /// Patterns in fixture order
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Inputs in fixture order
    pub fn inputs(&self) -> &InputSet {
        &self.inputs
    }

    /// Expected outcomes
    pub fn expectations(&self) -> &ExpectationTable {
        &self.expectations
    }

    /// Number of searches in one full pass
    pub fn searches_per_pass(&self) -> usize {
        self.patterns.len() * self.inputs.len()
    }

    /// Compare an observed grid against the expectation table
    pub fn mismatches(&self, observed: &MatchGrid) -> Vec<Mismatch> {
        let mut mismatches = Vec::new();
        for (i, pattern) in self.patterns.iter().enumerate() {
            for j in 0..self.inputs.len() {
                let expected = self.expectations.expects(i, j);
                let actual = observed.get(i, j);
                if expected != actual {
                    mismatches.push(Mismatch {
                        pattern_index: i,
                        input_index: j,
                        pattern: pattern.to_string(),
                        expected,
                        observed: actual,
                    });
                }
            }
        }
        mismatches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_dimensions() {
        let fixture = Fixture::standard();
        assert_eq!(fixture.patterns().len(), 4);
        assert_eq!(fixture.inputs().len(), 6);
        assert_eq!(fixture.expectations().dimensions(), (4, 6));
        assert_eq!(fixture.searches_per_pass(), 24);
        assert_eq!(fixture.expectations().grid().count_matches(), 6);
    }

    #[test]
    fn test_grid_only_built_through_constructor() {
        let mut grid = MatchGrid::new(2, 3);
        grid.set(1, 2, true).unwrap();
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.row(1), &[false, false, true]);
        assert!(grid.row(2).is_empty());
        assert!(!grid.get(5, 0));
        assert!(grid.set(2, 0, true).is_err());
        assert_eq!(grid.count_matches(), 1);
    }

    #[test]
    fn test_block_pattern_row() {
        let fixture = Fixture::with_block_pattern();
        assert_eq!(fixture.patterns().len(), 5);
        assert_eq!(fixture.patterns().get(4), Some(BLOCK_PATTERN));
        assert_eq!(
            fixture.expectations().grid().row(4),
            &[false, false, false, false, false, true]
        );
    }

    #[test]
    fn test_recorded_expectations() {
        let table = Fixture::standard().expectations().clone();
        assert!(table.expects(0, 0));
        assert!(table.expects(2, 2));
        assert!(!table.expects(2, 0));
        assert!(table.expects(3, 4));
        assert!(!table.expects(3, 3));
        // Out of range reads as "no match expected"
        assert!(!table.expects(10, 10));
    }

    #[test]
    fn test_block_text_shape() {
        let text = block_text();
        assert!(text.starts_with("{1:\n"));
        assert!(text.ends_with("at the end\n-}\n"));
        assert_eq!(text.lines().count(), 1 + 1 + BLOCK_BODY_LINES + 1 + 1);
        assert!(!text.contains('/'));
    }

    #[test]
    fn test_from_matches_rejects_out_of_range() {
        let err = ExpectationTable::from_matches(2, 2, &[(0, 0), (2, 1)]).unwrap_err();
        assert!(matches!(err, BenchError::Fixture(_)));
    }

    #[test]
    fn test_fixture_rejects_dimension_mismatch() {
        let result = Fixture::new(
            PatternSet::new(["a", "b"]),
            InputSet::new(["x"]),
            ExpectationTable::new(3, 1),
        );
        assert!(matches!(result, Err(BenchError::Fixture(_))));
    }

    #[test]
    fn test_mismatches_reports_each_cell() {
        let fixture = Fixture::new(
            PatternSet::new(["a", "b"]),
            InputSet::new(["a", "b"]),
            ExpectationTable::from_matches(2, 2, &[(0, 0), (1, 1)]).unwrap(),
        )
        .unwrap();

        let mut observed = MatchGrid::new(2, 2);
        observed.set(0, 0, true).unwrap();
        observed.set(0, 1, true).unwrap();

        let mismatches = fixture.mismatches(&observed);
        assert_eq!(mismatches.len(), 2);
        assert_eq!(
            mismatches[0],
            Mismatch {
                pattern_index: 0,
                input_index: 1,
                pattern: "a".to_string(),
                expected: false,
                observed: true,
            }
        );
        assert_eq!(mismatches[1].pattern_index, 1);
        assert!(mismatches[1].expected && !mismatches[1].observed);
    }
}
