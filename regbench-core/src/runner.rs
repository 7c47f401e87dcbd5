//! Benchmark Runner
//!
//! Compiles a fixture's patterns with one engine, runs warm-up passes, then
//! times the measured passes. A pass searches every input with every
//! pattern, patterns-major, in fixture order.
//!
//! ```text
//! compile all ──► [observe + verify] ──► warm-up passes ──► timed passes
//!                   (untimed, optional)     (discarded)       (TimingResult)
//! ```
//!
//! Any engine failure aborts the invocation; nothing is retried.

use crate::engine::{Engine, EngineOptions};
use crate::error::BenchError;
use crate::fixture::{Fixture, InputSet, MatchGrid, Mismatch, PatternSet};
use crate::measure::Timer;
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default number of warm-up passes
pub const DEFAULT_WARMUP_ITERATIONS: u64 = 10;

/// Default number of measured passes
pub const DEFAULT_MEASURED_ITERATIONS: u64 = 100;

/// How observed match results are checked against the expectation table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyMode {
    /// Skip verification
    Off,
    /// Log mismatches and keep going
    #[default]
    Warn,
    /// Fail the run on any mismatch
    Strict,
}

impl std::str::FromStr for VerifyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Ok(VerifyMode::Off),
            "warn" => Ok(VerifyMode::Warn),
            "strict" => Ok(VerifyMode::Strict),
            other => Err(format!("Unknown verify mode: {}", other)),
        }
    }
}

/// Configuration for one runner invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Passes run before the timer starts
    pub warmup_iterations: u64,
    /// Passes covered by the timer (at least 1)
    pub measured_iterations: u64,
    /// Expectation checking
    pub verify: VerifyMode,
    /// Options handed to the engine adapter
    pub engine: EngineOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
            measured_iterations: DEFAULT_MEASURED_ITERATIONS,
            verify: VerifyMode::default(),
            engine: EngineOptions::default(),
        }
    }
}

/// Elapsed time of the measured passes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingResult {
    /// Engine display name
    pub engine: String,
    pub warmup_iterations: u64,
    pub measured_iterations: u64,
    /// Searches performed while timed
    pub searches: u64,
    /// Searches that found a match while timed
    pub matches: u64,
    /// Wall-clock time of all measured passes
    pub elapsed: Duration,
    /// Cycle counter ticks over the same region (0 where unsupported)
    pub cycles: u64,
}

impl TimingResult {
    /// Elapsed time in whole microseconds
    pub fn micros(&self) -> u128 {
        self.elapsed.as_micros()
    }

    /// Mean time per search in nanoseconds
    pub fn nanos_per_search(&self) -> f64 {
        if self.searches == 0 {
            return 0.0;
        }
        self.elapsed.as_nanos() as f64 / self.searches as f64
    }
}

/// Result of a full runner invocation
#[derive(Debug, Clone)]
pub struct BenchmarkOutcome {
    pub timing: TimingResult,
    /// Observed match grid, when verification ran
    pub observed: Option<MatchGrid>,
    /// Cells that disagreed with the expectation table (warn mode)
    pub mismatches: Vec<Mismatch>,
}

/// Time `measured_iterations` passes of `patterns` × `inputs` on `engine`.
pub fn run_benchmark<E: Engine>(
    engine: &E,
    patterns: &PatternSet,
    inputs: &InputSet,
    warmup_iterations: u64,
    measured_iterations: u64,
) -> Result<TimingResult, BenchError> {
    if measured_iterations == 0 {
        return Err(BenchError::NoMeasuredIterations);
    }

    let name = engine.name().to_string();
    let mut compiled = compile_all(engine, patterns)?;
    debug!(engine = %name, patterns = compiled.len(), "compiled patterns");

    for _ in 0..warmup_iterations {
        run_pass(engine, &mut compiled, inputs)?;
    }
    debug!(engine = %name, passes = warmup_iterations, "warm up done");

    let mut matches = 0u64;
    let timer = Timer::start();
    for _ in 0..measured_iterations {
        matches += run_pass(engine, &mut compiled, inputs)?;
    }
    let elapsed = timer.stop();

    let result = TimingResult {
        engine: name,
        warmup_iterations,
        measured_iterations,
        searches: measured_iterations * (patterns.len() * inputs.len()) as u64,
        matches,
        elapsed: elapsed.duration,
        cycles: elapsed.cycles,
    };
    info!(
        engine = %result.engine,
        elapsed_us = %result.micros(),
        "{} pattern: {}µs",
        result.engine,
        result.micros()
    );
    Ok(result)
}

/// Run one untimed pass and record which cells matched.
pub fn observe<E: Engine>(engine: &E, fixture: &Fixture) -> Result<MatchGrid, BenchError> {
    let inputs = fixture.inputs();
    let mut compiled = compile_all(engine, fixture.patterns())?;
    let mut grid = MatchGrid::new(compiled.len(), inputs.len());

    for (i, pattern) in compiled.iter_mut().enumerate() {
        for (j, input) in inputs.iter().enumerate() {
            let found = search(engine, pattern, input, i, j)?;
            grid.set(i, j, found.is_some())?;
        }
    }
    Ok(grid)
}

/// Observe `engine` on `fixture` and list every cell that disagrees with it.
pub fn verify_expectations<E: Engine>(
    engine: &E,
    fixture: &Fixture,
) -> Result<Vec<Mismatch>, BenchError> {
    let observed = observe(engine, fixture)?;
    Ok(fixture.mismatches(&observed))
}

/// Runs one engine against a fixture with a fixed [`RunConfig`].
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRunner {
    config: RunConfig,
}

impl BenchmarkRunner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Verify (if enabled), then time the fixture on `engine`.
    pub fn run<E: Engine>(
        &self,
        engine: &E,
        fixture: &Fixture,
    ) -> Result<BenchmarkOutcome, BenchError> {
        if self.config.measured_iterations == 0 {
            return Err(BenchError::NoMeasuredIterations);
        }

        let (observed, mismatches) = match self.config.verify {
            VerifyMode::Off => (None, Vec::new()),
            mode => {
                let grid = observe(engine, fixture)?;
                let mismatches = fixture.mismatches(&grid);
                if !mismatches.is_empty() {
                    if mode == VerifyMode::Strict {
                        return Err(BenchError::ExpectationMismatch {
                            engine: engine.name().to_string(),
                            mismatches,
                        });
                    }
                    for m in &mismatches {
                        warn!(
                            engine = engine.name(),
                            pattern = m.pattern_index,
                            input = m.input_index,
                            "expected match={} but observed match={} for `{}`",
                            m.expected,
                            m.observed,
                            m.pattern
                        );
                    }
                }
                (Some(grid), mismatches)
            }
        };

        let timing = run_benchmark(
            engine,
            fixture.patterns(),
            fixture.inputs(),
            self.config.warmup_iterations,
            self.config.measured_iterations,
        )?;

        Ok(BenchmarkOutcome {
            timing,
            observed,
            mismatches,
        })
    }
}

fn compile_all<E: Engine>(
    engine: &E,
    patterns: &PatternSet,
) -> Result<Vec<E::Compiled>, BenchError> {
    patterns
        .iter()
        .enumerate()
        .map(|(index, pattern)| {
            engine
                .compile(pattern)
                .map_err(|source| BenchError::Compilation {
                    engine: engine.name().to_string(),
                    index,
                    pattern: pattern.to_string(),
                    source,
                })
        })
        .collect()
}

/// One full pass; returns the number of searches that matched.
#[inline]
fn run_pass<E: Engine>(
    engine: &E,
    compiled: &mut [E::Compiled],
    inputs: &InputSet,
) -> Result<u64, BenchError> {
    let mut matches = 0u64;
    for (i, pattern) in compiled.iter_mut().enumerate() {
        for (j, input) in inputs.iter().enumerate() {
            if black_box(search(engine, pattern, input, i, j)?).is_some() {
                matches += 1;
            }
        }
    }
    Ok(matches)
}

#[inline]
fn search<E: Engine>(
    engine: &E,
    compiled: &mut E::Compiled,
    input: &str,
    pattern_index: usize,
    input_index: usize,
) -> Result<Option<usize>, BenchError> {
    engine
        .search(compiled, black_box(input))
        .map_err(|source| BenchError::Search {
            engine: engine.name().to_string(),
            pattern_index,
            input_index,
            source,
        })
}
