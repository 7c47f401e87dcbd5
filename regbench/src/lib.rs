#![warn(missing_docs)]
//! # regbench
//!
//! Micro-benchmark harness that times regex engines on a fixed corpus of
//! patterns and inputs.
//!
//! - **Pluggable engines**: each engine sits behind the [`Engine`] trait;
//!   `fancy-regex` (native strings) and Oniguruma (UTF-8 byte ranges) ship
//!   in [`ENGINES`]
//! - **Fixed fixture**: patterns × inputs with a recorded expectation table
//! - **Verification**: observed match results checked against the fixture
//!   (`off`, `warn` or `strict`)
//! - **Reports**: human, JSON and CSV output with host metadata
//! - **High-Precision Timing**: cycle counting on x86_64/AArch64 alongside
//!   wall-clock time
//!
//! ## Quick Start
//!
//! ```ignore
//! use regbench::prelude::*;
//!
//! let fixture = Fixture::standard();
//! let engine = OnigEngine::from_options(&EngineOptions::default());
//! let timing = run_benchmark(&engine, fixture.patterns(), fixture.inputs(), 1, 100)?;
//! println!("{} pattern: {}µs", timing.engine, timing.micros());
//! ```

// Re-export core types
pub use regbench_core::{
    BenchError, BenchmarkOutcome, BenchmarkRunner, DEFAULT_BACKTRACK_LIMIT,
    DEFAULT_MEASURED_ITERATIONS, DEFAULT_WARMUP_ITERATIONS, ENGINES, Engine, EngineDef,
    EngineError, EngineOptions, ExpectationTable, FancyEngine, Fixture, InputSet, MatchGrid,
    Mismatch, OnigEngine, PatternSet, RunConfig, TimingResult, VerifyMode, find_engine, observe,
    run_benchmark, verify_expectations,
};

// Re-export report types
pub use regbench_report::{
    EngineReportResult, EngineStatus, OutputFormat, Report, ReportSummary, TimingMetrics,
    generate_csv_report, generate_json_report,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchmarkRunner, Engine, EngineOptions, FancyEngine, Fixture, OnigEngine, RunConfig,
        VerifyMode, run_benchmark,
    };
}

/// Run the regbench CLI harness.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     regbench::run()
/// }
/// ```
pub use regbench_cli::run;
