//! fancy-regex adapter
//!
//! Operates on native `&str` input with Unicode semantics. Patterns that
//! need backtracking features (backreferences, lookaround) run on
//! fancy-regex's VM; everything else is delegated to the `regex` crate.

use super::{Engine, EngineOptions};
use crate::error::EngineError;
use fancy_regex::{Regex, RegexBuilder};

/// Text-oriented backtracking engine
#[derive(Debug, Clone)]
pub struct FancyEngine {
    backtrack_limit: usize,
}

impl Engine for FancyEngine {
    type Compiled = Regex;

    fn from_options(options: &EngineOptions) -> Self {
        Self {
            backtrack_limit: options.backtrack_limit,
        }
    }

    fn name(&self) -> &str {
        "fancy-regex"
    }

    fn compile(&self, pattern: &str) -> Result<Regex, EngineError> {
        let regex = RegexBuilder::new(pattern)
            .backtrack_limit(self.backtrack_limit)
            .build()?;
        Ok(regex)
    }

    #[inline]
    fn search(&self, compiled: &mut Regex, input: &str) -> Result<Option<usize>, EngineError> {
        Ok(compiled.find(input)?.map(|m| m.start()))
    }
}
