//! Expectation Verification
//!
//! Backs the `verify` subcommand: runs only the untimed observation pass
//! for each engine and compares every cell with the fixture.

use regbench_core::{EngineDef, EngineOptions, Fixture, MatchGrid, Mismatch};

/// Observation result for one engine
#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub engine_id: String,
    pub engine_name: String,
    /// Observed grid, absent when the engine failed to compile or search
    pub observed: Option<MatchGrid>,
    pub mismatches: Vec<Mismatch>,
    pub error: Option<String>,
}

impl VerificationResult {
    /// Every cell agreed with the fixture
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.mismatches.is_empty()
    }
}

/// Aggregate counts over all verification results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub mismatched: usize,
    pub errors: usize,
}

impl VerificationSummary {
    /// Whether the process should exit non-zero
    pub fn should_fail(&self) -> bool {
        self.mismatched > 0 || self.errors > 0
    }
}

/// Observe every engine once against `fixture`
pub fn execute_verifications(
    engines: &[&EngineDef],
    fixture: &Fixture,
    options: &EngineOptions,
) -> Vec<VerificationResult> {
    engines
        .iter()
        .map(|def| match (def.observe_fn)(fixture, options) {
            Ok(grid) => VerificationResult {
                engine_id: def.id.to_string(),
                engine_name: def.name.to_string(),
                mismatches: fixture.mismatches(&grid),
                observed: Some(grid),
                error: None,
            },
            Err(e) => VerificationResult {
                engine_id: def.id.to_string(),
                engine_name: def.name.to_string(),
                observed: None,
                mismatches: Vec::new(),
                error: Some(e.to_string()),
            },
        })
        .collect()
}

/// Count passed, mismatched and errored engines
pub fn aggregate_verifications(results: &[VerificationResult]) -> VerificationSummary {
    let mut summary = VerificationSummary {
        total: results.len(),
        ..Default::default()
    };
    for result in results {
        if result.error.is_some() {
            summary.errors += 1;
        } else if !result.mismatches.is_empty() {
            summary.mismatched += 1;
        } else {
            summary.passed += 1;
        }
    }
    summary
}

/// Render the verification table.
///
/// One block per engine: a row per pattern, a column per input, each cell
/// showing the observed outcome (`Y`/`.`) and flagged with `!` when it
/// disagrees with the fixture.
pub fn format_verification_output(fixture: &Fixture, results: &[VerificationResult]) -> String {
    let mut output = String::new();
    let (patterns, inputs) = fixture.expectations().dimensions();

    output.push('\n');
    output.push_str("regbench Verification\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for result in results {
        let icon = if result.passed() { "✓" } else { "✗" };
        output.push_str(&format!("{} {} ({})\n", icon, result.engine_name, result.engine_id));

        if let Some(error) = &result.error {
            output.push_str(&format!("      error: {}\n\n", error));
            continue;
        }

        if let Some(grid) = &result.observed {
            output.push_str("      ");
            for j in 0..inputs {
                output.push_str(&format!(" in{:<2}", j));
            }
            output.push('\n');

            for i in 0..patterns {
                output.push_str(&format!("  p{:<2} ", i));
                for j in 0..inputs {
                    let observed = grid.get(i, j);
                    let mark = if observed { "Y" } else { "." };
                    let flag = if observed != fixture.expectations().expects(i, j) {
                        "!"
                    } else {
                        " "
                    };
                    output.push_str(&format!("  {}{} ", mark, flag));
                }
                output.push('\n');
            }
        }

        for m in &result.mismatches {
            output.push_str(&format!(
                "      p{} × in{}: expected {}, observed {}  `{}`\n",
                m.pattern_index,
                m.input_index,
                outcome(m.expected),
                outcome(m.observed),
                m.pattern
            ));
        }
        output.push('\n');
    }

    let summary = aggregate_verifications(results);
    output.push_str(&format!(
        "{} engines: {} passed, {} mismatched, {} errors\n",
        summary.total, summary.passed, summary.mismatched, summary.errors
    ));

    output
}

fn outcome(matched: bool) -> &'static str {
    if matched { "match" } else { "no match" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regbench_core::{BenchError, BenchmarkOutcome, ENGINES, RunConfig};

    fn unused_runner(_: &Fixture, _: &RunConfig) -> Result<BenchmarkOutcome, BenchError> {
        Err(BenchError::NoMeasuredIterations)
    }

    fn all_false(fixture: &Fixture, _: &EngineOptions) -> Result<MatchGrid, BenchError> {
        let (p, i) = fixture.expectations().dimensions();
        Ok(MatchGrid::new(p, i))
    }

    #[test]
    fn test_registered_engines_verify_clean() {
        let fixture = Fixture::standard();
        let engines: Vec<&EngineDef> = ENGINES.iter().collect();
        let results = execute_verifications(&engines, &fixture, &EngineOptions::default());
        let summary = aggregate_verifications(&results);
        assert_eq!(summary.passed, ENGINES.len());
        assert!(!summary.should_fail());
    }

    #[test]
    fn test_mismatches_are_reported() {
        let fixture = Fixture::standard();
        let blind = EngineDef {
            id: "blind",
            name: "Blind",
            description: "never matches",
            warmup_iterations: None,
            runner_fn: unused_runner,
            observe_fn: all_false,
        };
        let results = execute_verifications(&[&blind], &fixture, &EngineOptions::default());
        assert_eq!(results[0].mismatches.len(), 6);

        let summary = aggregate_verifications(&results);
        assert_eq!(summary.mismatched, 1);
        assert!(summary.should_fail());

        let text = format_verification_output(&fixture, &results);
        assert!(text.contains("✗ Blind (blind)"));
        assert!(text.contains("expected match, observed no match"));
    }
}
