//! Engine Adapters
//!
//! Every regex implementation under test sits behind the [`Engine`] trait,
//! which exposes exactly two capabilities: compile a pattern string, and
//! search one input with a compiled pattern. The runner is generic over this
//! trait and never sees engine-specific types.
//!
//! Registered engines are listed in [`ENGINES`]. Adding an engine means
//! implementing [`Engine`] and appending one [`EngineDef`].

mod fancy;
mod oniguruma;

pub use self::fancy::FancyEngine;
pub use self::oniguruma::{OnigEngine, OnigPattern};

use crate::error::{BenchError, EngineError};
use crate::fixture::{Fixture, MatchGrid};
use crate::runner::{BenchmarkOutcome, BenchmarkRunner, RunConfig, observe};
use serde::{Deserialize, Serialize};

/// Default backtracking budget handed to engines that support one
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// A regex implementation that can be benchmarked.
pub trait Engine: Send + Sync {
    /// Engine-specific compiled form of one pattern
    type Compiled;

    /// Build the adapter from shared engine options
    fn from_options(options: &EngineOptions) -> Self
    where
        Self: Sized;

    /// Display name used in output lines
    fn name(&self) -> &str;

    /// Compile a pattern string
    fn compile(&self, pattern: &str) -> Result<Self::Compiled, EngineError>;

    /// Search `input`, returning the byte offset where the leftmost match starts
    fn search(
        &self,
        compiled: &mut Self::Compiled,
        input: &str,
    ) -> Result<Option<usize>, EngineError>;
}

/// Options shared by all engine adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Maximum backtracking steps per search before the engine gives up
    pub backtrack_limit: usize,
    /// Track capture groups while searching
    pub capture_groups: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
            capture_groups: true,
        }
    }
}

/// Registry entry for one benchmarkable engine
#[derive(Debug, Clone, Copy)]
pub struct EngineDef {
    /// Unique identifier, used for filtering
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Warm-up passes used when none are configured explicitly
    pub warmup_iterations: Option<u64>,
    /// Runs the full benchmark for this engine
    pub runner_fn: fn(&Fixture, &RunConfig) -> Result<BenchmarkOutcome, BenchError>,
    /// Runs a single untimed pass and records match results
    pub observe_fn: fn(&Fixture, &EngineOptions) -> Result<MatchGrid, BenchError>,
}

/// All registered engines, in execution order
pub static ENGINES: &[EngineDef] = &[
    EngineDef {
        id: "fancy-regex",
        name: "fancy-regex",
        description: "Backtracking matcher over native strings (fancy-regex)",
        warmup_iterations: Some(10),
        runner_fn: run_engine::<FancyEngine>,
        observe_fn: observe_engine::<FancyEngine>,
    },
    EngineDef {
        id: "onig",
        name: "Oniguruma",
        description: "Backtracking matcher over UTF-8 byte ranges (onig)",
        warmup_iterations: Some(1),
        runner_fn: run_engine::<OnigEngine>,
        observe_fn: observe_engine::<OnigEngine>,
    },
];

/// Look up a registered engine by id
pub fn find_engine(id: &str) -> Option<&'static EngineDef> {
    ENGINES.iter().find(|def| def.id == id)
}

fn run_engine<E: Engine>(
    fixture: &Fixture,
    config: &RunConfig,
) -> Result<BenchmarkOutcome, BenchError> {
    let engine = E::from_options(&config.engine);
    BenchmarkRunner::new(config.clone()).run(&engine, fixture)
}

fn observe_engine<E: Engine>(
    fixture: &Fixture,
    options: &EngineOptions,
) -> Result<MatchGrid, BenchError> {
    let engine = E::from_options(options);
    observe(&engine, fixture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_ids_are_unique() {
        let mut ids: Vec<_> = ENGINES.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ENGINES.len());
    }

    #[test]
    fn test_find_engine() {
        assert_eq!(find_engine("onig").map(|d| d.name), Some("Oniguruma"));
        assert!(find_engine("pcre").is_none());
    }

    #[test]
    fn test_registered_engines_observe_fixture() {
        let fixture = Fixture::standard();
        for def in ENGINES {
            let grid = (def.observe_fn)(&fixture, &EngineOptions::default()).unwrap();
            assert_eq!(
                &grid,
                fixture.expectations().grid(),
                "{} disagrees with the fixture",
                def.id
            );
        }
    }
}
