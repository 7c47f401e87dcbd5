#![warn(missing_docs)]
//! regbench Core - Engines and Runner
//!
//! This crate provides everything needed to time regex engines on a fixed
//! corpus:
//! - `Engine` trait with adapters for fancy-regex and Oniguruma
//! - `Fixture` holding patterns, inputs and expected outcomes
//! - `BenchmarkRunner` / `run_benchmark` for warm-up and timed passes
//! - High-precision pass timing with cycle counts where available

mod engine;
mod error;
mod fixture;
mod measure;
mod runner;

pub use engine::{
    DEFAULT_BACKTRACK_LIMIT, ENGINES, Engine, EngineDef, EngineOptions, FancyEngine, OnigEngine,
    OnigPattern, find_engine,
};
pub use error::{BenchError, EngineError};
pub use fixture::{
    BLOCK_PATTERN, DOLLAR_PATTERN, DUPLICATE_WORDS_PATTERN, ExpectationTable, Fixture, InputSet,
    MatchGrid, Mismatch, PatternSet, UNANCHORED_URL_PATTERN, URL_PATTERN, block_text,
};
/// Whether this platform provides hardware cycle counters.
/// When `false`, cycle counts are reported as 0.
pub use measure::HAS_CYCLE_COUNTER;
pub use measure::{Elapsed, Timer, pin_to_cpu};
pub use runner::{
    BenchmarkOutcome, BenchmarkRunner, DEFAULT_MEASURED_ITERATIONS, DEFAULT_WARMUP_ITERATIONS,
    RunConfig, TimingResult, VerifyMode, observe, run_benchmark, verify_expectations,
};
