//! Report Data Structures

use chrono::{DateTime, Utc};
use regbench_core::{Mismatch, TimingResult, VerifyMode};
use serde::{Deserialize, Serialize};

/// Version of the JSON layout below
pub const SCHEMA_VERSION: u32 = 1;

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub config: ReportConfig,
    pub fixture: FixtureInfo,
    pub results: Vec<EngineReportResult>,
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub git_commit: Option<String>,
    pub git_branch: Option<String>,
    pub system: SystemInfo,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
    pub memory_gb: f64,
}

/// Run configuration captured in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Explicit warm-up count, or `None` when engine defaults applied
    pub warmup_iterations: Option<u64>,
    pub measured_iterations: u64,
    pub verify: VerifyMode,
    pub backtrack_limit: usize,
    pub capture_groups: bool,
    pub parallel: bool,
}

/// Shape of the corpus the engines ran against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureInfo {
    pub patterns: usize,
    pub inputs: usize,
    pub input_bytes: usize,
    pub expected_matches: usize,
}

/// Outcome of one engine invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineReportResult {
    pub id: String,
    pub name: String,
    pub status: EngineStatus,
    pub metrics: Option<TimingMetrics>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mismatches: Vec<Mismatch>,
    pub failure: Option<FailureInfo>,
    /// Wall time of the whole invocation, including verification and warm-up
    #[serde(default)]
    pub wall_time_ns: u64,
}

/// Engine run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    /// Timed, and every observed result matched the fixture
    Passed,
    /// Timed, but some results disagreed with the fixture
    Mismatched,
    /// Aborted by a compile, search or strict verification error
    Failed,
}

impl EngineStatus {
    /// Terminal icon for this status
    pub fn icon(self) -> &'static str {
        match self {
            EngineStatus::Passed => "✓",
            EngineStatus::Mismatched => "≠",
            EngineStatus::Failed => "✗",
        }
    }
}

/// Timing of the measured passes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingMetrics {
    pub elapsed_us: u64,
    pub elapsed_ns: u64,
    pub cycles: u64,
    pub warmup_iterations: u64,
    pub measured_iterations: u64,
    pub searches: u64,
    pub matches: u64,
    pub ns_per_search: f64,
}

impl From<&TimingResult> for TimingMetrics {
    fn from(timing: &TimingResult) -> Self {
        Self {
            elapsed_us: timing.micros() as u64,
            elapsed_ns: timing.elapsed.as_nanos() as u64,
            cycles: timing.cycles,
            warmup_iterations: timing.warmup_iterations,
            measured_iterations: timing.measured_iterations,
            searches: timing.searches,
            matches: timing.matches,
            ns_per_search: timing.nanos_per_search(),
        }
    }
}

/// Failure information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureInfo {
    /// "compilation", "search", "expectation" or "config"
    pub kind: String,
    pub message: String,
}

/// Report summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_engines: usize,
    pub passed: usize,
    pub mismatched: usize,
    pub failed: usize,
    /// Id of the engine with the lowest elapsed time
    pub fastest: Option<String>,
    pub total_duration_ms: f64,
}

impl ReportSummary {
    /// Tally statuses and pick the fastest timed engine
    pub fn from_results(results: &[EngineReportResult], total_duration_ms: f64) -> Self {
        let count = |status: EngineStatus| results.iter().filter(|r| r.status == status).count();
        let fastest = results
            .iter()
            .filter_map(|r| r.metrics.as_ref().map(|m| (r, m.elapsed_ns)))
            .min_by_key(|(_, ns)| *ns)
            .map(|(r, _)| r.id.clone());

        Self {
            total_engines: results.len(),
            passed: count(EngineStatus::Passed),
            mismatched: count(EngineStatus::Mismatched),
            failed: count(EngineStatus::Failed),
            fastest,
            total_duration_ms,
        }
    }
}

impl Report {
    /// Whether any engine failed outright
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    /// Look up an engine's result by id
    pub fn result(&self, id: &str) -> Option<&EngineReportResult> {
        self.results.iter().find(|r| r.id == id)
    }
}

/// A two-engine report, one timed and one failed, shared by renderer tests
#[cfg(test)]
pub(crate) fn sample_report() -> Report {
    let results = vec![
        EngineReportResult {
            id: "onig".to_string(),
            name: "Oniguruma".to_string(),
            status: EngineStatus::Passed,
            metrics: Some(TimingMetrics {
                elapsed_us: 900,
                elapsed_ns: 900_000,
                cycles: 0,
                warmup_iterations: 1,
                measured_iterations: 100,
                searches: 2_400,
                matches: 600,
                ns_per_search: 375.0,
            }),
            mismatches: Vec::new(),
            failure: None,
            wall_time_ns: 1_250_000,
        },
        EngineReportResult {
            id: "fancy-regex".to_string(),
            name: "fancy-regex".to_string(),
            status: EngineStatus::Failed,
            metrics: None,
            mismatches: vec![Mismatch {
                pattern_index: 3,
                input_index: 4,
                pattern: r"\b(\w+)(\s+\1)+\b".to_string(),
                expected: false,
                observed: true,
            }],
            failure: Some(FailureInfo {
                kind: "expectation".to_string(),
                message: "1 mismatch, pattern #3 \"repeat\"".to_string(),
            }),
            wall_time_ns: 40_000,
        },
    ];
    let summary = ReportSummary::from_results(&results, 12.5);

    Report {
        meta: ReportMeta {
            schema_version: SCHEMA_VERSION,
            version: "0.1.0".to_string(),
            timestamp: Utc::now(),
            git_commit: Some("abc1234".to_string()),
            git_branch: None,
            system: SystemInfo {
                os: "linux".to_string(),
                arch: "x86_64".to_string(),
                cpu: "Unknown".to_string(),
                cpu_cores: 8,
                memory_gb: 16.0,
            },
        },
        config: ReportConfig {
            warmup_iterations: None,
            measured_iterations: 100,
            verify: VerifyMode::Strict,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, status: EngineStatus, elapsed_ns: Option<u64>) -> EngineReportResult {
        EngineReportResult {
            id: id.to_string(),
            name: id.to_string(),
            status,
            metrics: elapsed_ns.map(|ns| TimingMetrics {
                elapsed_us: ns / 1_000,
                elapsed_ns: ns,
                cycles: 0,
                warmup_iterations: 1,
                measured_iterations: 100,
                searches: 2_400,
                matches: 600,
                ns_per_search: ns as f64 / 2_400.0,
            }),
            mismatches: Vec::new(),
            failure: None,
            wall_time_ns: elapsed_ns.unwrap_or_default() * 2,
        }
    }

    #[test]
    fn summary_counts_statuses_and_fastest() {
        let results = vec![
            result("fancy-regex", EngineStatus::Passed, Some(9_000)),
            result("onig", EngineStatus::Mismatched, Some(4_000)),
            result("broken", EngineStatus::Failed, None),
        ];
        let summary = ReportSummary::from_results(&results, 12.5);

        assert_eq!(summary.total_engines, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.mismatched, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.fastest.as_deref(), Some("onig"));
    }

    #[test]
    fn metrics_from_timing() {
        let timing = TimingResult {
            engine: "Oniguruma".to_string(),
            warmup_iterations: 1,
            measured_iterations: 10,
            searches: 240,
            matches: 60,
            elapsed: std::time::Duration::from_micros(480),
            cycles: 0,
        };
        let metrics = TimingMetrics::from(&timing);
        assert_eq!(metrics.elapsed_us, 480);
        assert_eq!(metrics.elapsed_ns, 480_000);
        assert!((metrics.ns_per_search - 2_000.0).abs() < f64::EPSILON);
    }
}
