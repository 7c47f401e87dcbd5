//! Engine Execution
//!
//! Runs each selected engine against the shared fixture and collects one
//! [`EngineExecutionResult`] per engine.
//!
//! ## Execution Modes
//!
//! - **Sequential (default)**: engines run one after another on the calling
//!   thread, in registry order.
//! - **Parallel**: each engine runs on a rayon worker. The fixture is shared
//!   read-only and every invocation owns its compiled patterns.
//!
//! ## Data Flow
//!
//! ```text
//! EngineDef (from ENGINES)
//!        │
//!        ▼
//!   ExecutionConfig ──resolve_for_engine──► RunConfig
//!        │
//!        ▼
//! ┌──────────────────┐
//! │     Executor     │  Verify → Warm-up → Timed passes
//! └────────┬─────────┘
//!          │
//!          ▼
//!  EngineExecutionResult (timing, mismatches, status)
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use regbench_core::{
    BenchError, DEFAULT_MEASURED_ITERATIONS, DEFAULT_WARMUP_ITERATIONS, EngineDef, EngineOptions,
    Fixture, Mismatch, RunConfig, TimingResult, VerifyMode, pin_to_cpu,
};
use regbench_report::EngineStatus;
use std::time::Instant;
use tracing::{debug, warn};

/// Configuration for engine execution
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Warm-up passes; `None` uses each engine's own default
    pub warmup_iterations: Option<u64>,
    /// Timed passes
    pub measured_iterations: u64,
    /// Expectation checking
    pub verify: VerifyMode,
    /// Options handed to every engine adapter
    pub engine: EngineOptions,
    /// Run engines on rayon workers
    pub parallel: bool,
    /// Pin the benchmark thread to this CPU (sequential mode only)
    pub pin_cpu: Option<usize>,
}

impl ExecutionConfig {
    /// Build the runner configuration for one engine.
    ///
    /// Priority for warm-up passes:
    /// 1. Explicit `warmup_iterations` (CLI or regbench.toml)
    /// 2. The engine's registered default
    /// 3. [`DEFAULT_WARMUP_ITERATIONS`]
    pub fn resolve_for_engine(&self, def: &EngineDef) -> RunConfig {
        RunConfig {
            warmup_iterations: self
                .warmup_iterations
                .or(def.warmup_iterations)
                .unwrap_or(DEFAULT_WARMUP_ITERATIONS),
            measured_iterations: self.measured_iterations,
            verify: self.verify,
            engine: self.engine,
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: None,
            measured_iterations: DEFAULT_MEASURED_ITERATIONS,
            verify: VerifyMode::default(),
            engine: EngineOptions::default(),
            parallel: false,
            pin_cpu: None,
        }
    }
}

/// Result from executing a single engine
#[derive(Debug, Clone)]
pub struct EngineExecutionResult {
    pub engine_id: String,
    pub engine_name: String,
    pub status: EngineStatus,
    pub timing: Option<TimingResult>,
    pub mismatches: Vec<Mismatch>,
    /// Failure category: "compilation", "search", "expectation", "config" or "panic"
    pub failure_kind: Option<String>,
    pub error_message: Option<String>,
    /// Wall-clock time of the whole invocation, including verification and warm-up
    pub duration_ns: u64,
}

/// Category name for a runner error
pub fn failure_kind(error: &BenchError) -> &'static str {
    match error {
        BenchError::Compilation { .. } => "compilation",
        BenchError::Search { .. } => "search",
        BenchError::ExpectationMismatch { .. } => "expectation",
        BenchError::Fixture(_) | BenchError::NoMeasuredIterations => "config",
    }
}

/// Execute engines and produce results
pub struct Executor {
    config: ExecutionConfig,
}

impl Executor {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Execute all provided engines against `fixture`.
    ///
    /// Results come back in the order of `engines` regardless of mode.
    pub fn execute(
        &self,
        engines: &[&EngineDef],
        fixture: &Fixture,
    ) -> Vec<EngineExecutionResult> {
        let pb = ProgressBar::new(engines.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let results: Vec<EngineExecutionResult> = if self.config.parallel {
            if self.config.pin_cpu.is_some() {
                warn!("pin_cpu is ignored in parallel mode");
            }
            pb.set_message("parallel");
            engines
                .par_iter()
                .map(|def| {
                    let result = self.execute_single(def, fixture);
                    pb.inc(1);
                    result
                })
                .collect()
        } else {
            if let Some(cpu) = self.config.pin_cpu {
                match pin_to_cpu(cpu) {
                    Ok(()) => debug!(cpu, "pinned benchmark thread"),
                    Err(e) => warn!("failed to pin to CPU {}: {}", cpu, e),
                }
            }
            engines
                .iter()
                .map(|def| {
                    pb.set_message(def.id);
                    let result = self.execute_single(def, fixture);
                    pb.inc(1);
                    result
                })
                .collect()
        };

        pb.finish_with_message("Complete");
        results
    }

    /// Execute a single engine
    fn execute_single(&self, def: &EngineDef, fixture: &Fixture) -> EngineExecutionResult {
        let start = Instant::now();
        let cfg = self.config.resolve_for_engine(def);
        debug!(
            engine = def.id,
            warmup = cfg.warmup_iterations,
            measured = cfg.measured_iterations,
            "starting engine"
        );

        // Run with panic catching
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            (def.runner_fn)(fixture, &cfg)
        }));

        let duration_ns = start.elapsed().as_nanos() as u64;

        let mut execution = EngineExecutionResult {
            engine_id: def.id.to_string(),
            engine_name: def.name.to_string(),
            status: EngineStatus::Failed,
            timing: None,
            mismatches: Vec::new(),
            failure_kind: None,
            error_message: None,
            duration_ns,
        };

        match result {
            Ok(Ok(outcome)) => {
                execution.status = if outcome.mismatches.is_empty() {
                    EngineStatus::Passed
                } else {
                    EngineStatus::Mismatched
                };
                execution.timing = Some(outcome.timing);
                execution.mismatches = outcome.mismatches;
            }
            Ok(Err(error)) => {
                tracing::error!("{}", error);
                execution.failure_kind = Some(failure_kind(&error).to_string());
                if let BenchError::ExpectationMismatch { mismatches, .. } = &error {
                    execution.mismatches = mismatches.clone();
                }
                execution.error_message = Some(error.to_string());
            }
            Err(panic) => {
                let message = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                tracing::error!("{} panicked: {}", def.id, message);
                execution.failure_kind = Some("panic".to_string());
                execution.error_message = Some(message);
            }
        }

        execution
    }
}
