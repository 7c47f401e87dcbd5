//! Engine Executor
//!
//! Runs engines against the fixture and turns the results into reports.
//!
//! ## Pipeline Overview
//!
//! ```text
//! EngineDef (from ENGINES)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Verify, warm up, time passes (sequential or rayon)
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Build Report with metadata and summary
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! The `verify` subcommand skips timing and goes straight through
//! [`verification`].
//!
//! ## Modules
//!
//! - [`execution`] - Per-engine execution and config resolution
//! - [`report`] - Report building
//! - [`verification`] - Observation-only runs and the mismatch table
//! - [`formatting`] - Human-readable output formatting
//! - [`metadata`] - System metadata collection

mod execution;
mod formatting;
mod metadata;
mod report;
mod verification;

// Re-export public API
pub use execution::{EngineExecutionResult, ExecutionConfig, Executor, failure_kind};
pub use formatting::{format_human_output, format_timing_line};
pub use metadata::build_report_meta;
pub use report::build_report;
pub use verification::{
    VerificationResult, VerificationSummary, aggregate_verifications, execute_verifications,
    format_verification_output,
};
