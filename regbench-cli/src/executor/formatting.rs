//! Output Formatting
//!
//! Human-readable output for benchmark reports:
//! - One `"<Engine> pattern: <µs>µs"` line per timed engine
//! - Per-engine detail (passes, searches, ns/search, cycles)
//! - Verification section listing any mismatched cells
//! - Summary with the fastest engine and relative speed

use regbench_report::{EngineStatus, Report};

/// The headline timing line for one engine
pub fn format_timing_line(name: &str, elapsed_us: u64) -> String {
    format!("{} pattern: {}µs", name, elapsed_us)
}

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("regbench Results\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "fixture: {} patterns × {} inputs ({} bytes), {} expected matches\n\n",
        report.fixture.patterns,
        report.fixture.inputs,
        report.fixture.input_bytes,
        report.fixture.expected_matches
    ));

    for result in &report.results {
        match &result.metrics {
            Some(metrics) => {
                output.push_str(&format_timing_line(&result.name, metrics.elapsed_us));
                output.push('\n');
                output.push_str(&format!(
                    "  {} warm-up: {}  measured: {}  searches: {}  matches: {}\n",
                    result.status.icon(),
                    metrics.warmup_iterations,
                    metrics.measured_iterations,
                    metrics.searches,
                    metrics.matches
                ));
                output.push_str(&format!("    {:.2} ns/search", metrics.ns_per_search));
                if metrics.cycles > 0 {
                    output.push_str(&format!("  cycles: {}", metrics.cycles));
                }
                output.push('\n');
            }
            None => {
                output.push_str(&format!(
                    "{} {} failed\n",
                    result.status.icon(),
                    result.name
                ));
            }
        }

        if let Some(failure) = &result.failure {
            output.push_str(&format!("    error ({}): {}\n", failure.kind, failure.message));
        }
        output.push('\n');
    }

    // Verification
    let mismatched: Vec<_> = report
        .results
        .iter()
        .filter(|r| !r.mismatches.is_empty())
        .collect();
    if !mismatched.is_empty() {
        output.push_str("Verification\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for result in mismatched {
            for m in &result.mismatches {
                output.push_str(&format!(
                    "  {} {}: pattern #{} on input #{} expected {} but observed {}\n",
                    EngineStatus::Mismatched.icon(),
                    result.name,
                    m.pattern_index,
                    m.input_index,
                    m.expected,
                    m.observed
                ));
            }
        }
        output.push('\n');
    }

    // Summary
    output.push_str("Summary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  {} engines: {} passed, {} mismatched, {} failed ({:.1} ms total)\n",
        report.summary.total_engines,
        report.summary.passed,
        report.summary.mismatched,
        report.summary.failed,
        report.summary.total_duration_ms
    ));

    if let Some(fastest) = report
        .summary
        .fastest
        .as_deref()
        .and_then(|id| report.result(id))
    {
        let fastest_ns = fastest
            .metrics
            .as_ref()
            .map(|m| m.elapsed_ns)
            .unwrap_or_default();
        output.push_str(&format!("  fastest: {}\n", fastest.name));

        for result in &report.results {
            if result.id == fastest.id {
                continue;
            }
            if let (Some(metrics), true) = (&result.metrics, fastest_ns > 0) {
                output.push_str(&format!(
                    "    {} is {:.2}x slower\n",
                    result.name,
                    metrics.elapsed_ns as f64 / fastest_ns as f64
                ));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use regbench_core::{Mismatch, VerifyMode};
    use regbench_report::{
        EngineReportResult, FailureInfo, FixtureInfo, ReportConfig, ReportMeta, ReportSummary,
        SystemInfo, TimingMetrics,
    };

    fn metrics(elapsed_us: u64) -> TimingMetrics {
        TimingMetrics {
            elapsed_us,
            elapsed_ns: elapsed_us * 1_000,
            cycles: 0,
            warmup_iterations: 10,
            measured_iterations: 100,
            searches: 2_400,
            matches: 600,
            ns_per_search: (elapsed_us * 1_000) as f64 / 2_400.0,
        }
    }

    fn report(results: Vec<EngineReportResult>) -> Report {
        let summary = ReportSummary::from_results(&results, 3.0);
        Report {
            meta: ReportMeta {
                schema_version: 1,
                version: "0.1.0".to_string(),
                timestamp: Utc::now(),
                git_commit: None,
                git_branch: None,
                system: SystemInfo {
                    os: "linux".to_string(),
                    arch: "x86_64".to_string(),
                    cpu: "Unknown".to_string(),
                    cpu_cores: 1,
                    memory_gb: 0.0,
                },
            },
            config: ReportConfig {
                warmup_iterations: None,
                measured_iterations: 100,
                verify: VerifyMode::Warn,
                backtrack_limit: 1_000_000,
                capture_groups: true,
                parallel: false,
            },
            fixture: FixtureInfo {
                patterns: 4,
                inputs: 6,
                input_bytes: 3_000,
                expected_matches: 6,
            },
            results,
            summary,
        }
    }

    #[test]
    fn test_timing_line() {
        assert_eq!(format_timing_line("Oniguruma", 1234), "Oniguruma pattern: 1234µs");
    }

    #[test]
    fn test_human_output() {
        let results = vec![
            EngineReportResult {
                id: "fancy-regex".to_string(),
                name: "fancy-regex".to_string(),
                status: EngineStatus::Mismatched,
                metrics: Some(metrics(800)),
                mismatches: vec![Mismatch {
                    pattern_index: 3,
                    input_index: 4,
                    pattern: r"\b(\w+)(\s+\1)+\b".to_string(),
                    expected: false,
                    observed: true,
                }],
                failure: None,
                wall_time_ns: 0,
            },
            EngineReportResult {
                id: "onig".to_string(),
                name: "Oniguruma".to_string(),
                status: EngineStatus::Passed,
                metrics: Some(metrics(400)),
                mismatches: Vec::new(),
                failure: None,
                wall_time_ns: 0,
            },
            EngineReportResult {
                id: "broken".to_string(),
                name: "Broken".to_string(),
                status: EngineStatus::Failed,
                metrics: None,
                mismatches: Vec::new(),
                failure: Some(FailureInfo {
                    kind: "search".to_string(),
                    message: "retry limit".to_string(),
                }),
                wall_time_ns: 0,
            },
        ];

        let text = format_human_output(&report(results));
        assert!(text.contains("fancy-regex pattern: 800µs\n"));
        assert!(text.contains("Oniguruma pattern: 400µs\n"));
        assert!(text.contains("✗ Broken failed"));
        assert!(text.contains("error (search): retry limit"));
        assert!(text.contains("pattern #3 on input #4 expected false but observed true"));
        assert!(text.contains("fastest: Oniguruma"));
        assert!(text.contains("fancy-regex is 2.00x slower"));
    }
}
