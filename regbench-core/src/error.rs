//! Error taxonomy for benchmark runs.
//!
//! Engine adapters report failures as [`EngineError`], a plain diagnostic
//! string. The runner wraps those with the engine name and the fixture
//! coordinates that triggered them, producing a [`BenchError`].

use crate::fixture::Mismatch;
use thiserror::Error;

/// Diagnostic raised by an engine adapter while compiling or searching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    /// Create an error from any diagnostic message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The engine's diagnostic message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<fancy_regex::Error> for EngineError {
    fn from(err: fancy_regex::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<onig::Error> for EngineError {
    fn from(err: onig::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Failure of a benchmark invocation.
#[derive(Debug, Error)]
pub enum BenchError {
    /// A pattern was rejected by the engine's syntax rules
    #[error("{engine}: failed to compile pattern #{index} `{pattern}`: {source}")]
    Compilation {
        engine: String,
        index: usize,
        pattern: String,
        #[source]
        source: EngineError,
    },

    /// The engine faulted while matching
    #[error(
        "{engine}: search failed for pattern #{pattern_index} on input #{input_index}: {source}"
    )]
    Search {
        engine: String,
        pattern_index: usize,
        input_index: usize,
        #[source]
        source: EngineError,
    },

    /// Observed match results disagree with the expectation table (strict mode)
    #[error("{engine}: {} match result(s) differ from the expectation table", mismatches.len())]
    ExpectationMismatch {
        engine: String,
        mismatches: Vec<Mismatch>,
    },

    /// Patterns, inputs and expectations do not line up
    #[error("Invalid fixture: {0}")]
    Fixture(String),

    /// A timing result needs at least one measured pass
    #[error("Measured iterations must be at least 1")]
    NoMeasuredIterations,
}

impl BenchError {
    /// Name of the engine the failure belongs to, if any
    pub fn engine(&self) -> Option<&str> {
        match self {
            BenchError::Compilation { engine, .. }
            | BenchError::Search { engine, .. }
            | BenchError::ExpectationMismatch { engine, .. } => Some(engine),
            BenchError::Fixture(_) | BenchError::NoMeasuredIterations => None,
        }
    }
}
