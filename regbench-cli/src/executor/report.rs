//! Report Building
//!
//! Turns execution results into a [`Report`] ready for any renderer.
//!
//! ```text
//! EngineExecutionResult ──► EngineReportResult ──┐
//! ExecutionConfig ────────► ReportConfig ────────┼──► Report
//! Fixture ────────────────► FixtureInfo ─────────┤
//! metadata ───────────────► ReportMeta ──────────┘
//! ```

use super::execution::{EngineExecutionResult, ExecutionConfig};
use super::metadata::build_report_meta;
use regbench_core::Fixture;
use regbench_report::{
    EngineReportResult, FailureInfo, FixtureInfo, Report, ReportConfig, ReportSummary,
    TimingMetrics,
};

/// Build a complete Report from execution results
///
/// # Arguments
/// * `results` - Engine execution results, in run order
/// * `fixture` - The fixture every engine ran against
/// * `config` - Execution configuration used for the run
/// * `total_duration_ms` - Total execution time in milliseconds
pub fn build_report(
    results: &[EngineExecutionResult],
    fixture: &Fixture,
    config: &ExecutionConfig,
    total_duration_ms: f64,
) -> Report {
    let results: Vec<EngineReportResult> = results.iter().map(report_result).collect();
    let summary = ReportSummary::from_results(&results, total_duration_ms);

    Report {
        meta: build_report_meta(),
        config: ReportConfig {
            warmup_iterations: config.warmup_iterations,
            measured_iterations: config.measured_iterations,
            verify: config.verify,
            backtrack_limit: config.engine.backtrack_limit,
            capture_groups: config.engine.capture_groups,
            parallel: config.parallel,
        },
        fixture: fixture_info(fixture),
        results,
        summary,
    }
}

fn report_result(result: &EngineExecutionResult) -> EngineReportResult {
    let failure = result.error_message.as_ref().map(|message| FailureInfo {
        kind: result
            .failure_kind
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
        message: message.clone(),
    });

    EngineReportResult {
        id: result.engine_id.clone(),
        name: result.engine_name.clone(),
        status: result.status,
        metrics: result.timing.as_ref().map(TimingMetrics::from),
        mismatches: result.mismatches.clone(),
        failure,
        wall_time_ns: result.duration_ns,
    }
}

fn fixture_info(fixture: &Fixture) -> FixtureInfo {
    FixtureInfo {
        patterns: fixture.patterns().len(),
        inputs: fixture.inputs().len(),
        input_bytes: fixture.inputs().total_bytes(),
        expected_matches: fixture.expectations().grid().count_matches(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regbench_core::TimingResult;
    use regbench_report::EngineStatus;
    use std::time::Duration;

    fn passed(id: &str, micros: u64) -> EngineExecutionResult {
        EngineExecutionResult {
            engine_id: id.to_string(),
            engine_name: id.to_string(),
            status: EngineStatus::Passed,
            timing: Some(TimingResult {
                engine: id.to_string(),
                warmup_iterations: 1,
                measured_iterations: 100,
                searches: 2_400,
                matches: 600,
                elapsed: Duration::from_micros(micros),
                cycles: 0,
            }),
            mismatches: Vec::new(),
            failure_kind: None,
            error_message: None,
            duration_ns: micros * 1_000,
        }
    }

    #[test]
    fn test_build_report() {
        let failed = EngineExecutionResult {
            engine_id: "broken".to_string(),
            engine_name: "broken".to_string(),
            status: EngineStatus::Failed,
            timing: None,
            mismatches: Vec::new(),
            failure_kind: Some("compilation".to_string()),
            error_message: Some("bad pattern".to_string()),
            duration_ns: 10,
        };
        let results = vec![passed("fancy-regex", 900), passed("onig", 300), failed];
        let report = build_report(
            &results,
            &Fixture::standard(),
            &ExecutionConfig::default(),
            5.0,
        );

        assert_eq!(report.fixture.patterns, 4);
        assert_eq!(report.fixture.inputs, 6);
        assert_eq!(report.fixture.expected_matches, 6);
        assert_eq!(report.summary.total_engines, 3);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.fastest.as_deref(), Some("onig"));
        assert!(report.has_failures());

        let broken = report.result("broken").unwrap();
        let failure = broken.failure.as_ref().unwrap();
        assert_eq!(failure.kind, "compilation");
        assert!(broken.metrics.is_none());
        assert_eq!(broken.wall_time_ns, 10);
        assert_eq!(report.result("fancy-regex").unwrap().wall_time_ns, 900_000);
        assert_eq!(
            report.result("onig").unwrap().metrics.as_ref().unwrap().elapsed_us,
            300
        );
    }
}
