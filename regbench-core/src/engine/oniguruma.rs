//! Oniguruma adapter
//!
//! Searches the UTF-8 bytes of each input over an explicit `0..len` range,
//! with capture-group tracking controlled by [`EngineOptions::capture_groups`].
//! Patterns use Oniguruma's default (Ruby) syntax.

use super::{Engine, EngineOptions};
use crate::error::EngineError;
use onig::{MatchParam, Regex, RegexOptions, Region, SearchOptions, Syntax};

/// Byte-oriented backtracking engine
#[derive(Debug, Clone)]
pub struct OnigEngine {
    capture_groups: bool,
}

/// A compiled Oniguruma pattern and the capture region reused across searches
pub struct OnigPattern {
    regex: Regex,
    region: Region,
}

impl Engine for OnigEngine {
    type Compiled = OnigPattern;

    // Oniguruma enforces its own retry limit, so `backtrack_limit` is not applied.
    fn from_options(options: &EngineOptions) -> Self {
        Self {
            capture_groups: options.capture_groups,
        }
    }

    fn name(&self) -> &str {
        "Oniguruma"
    }

    fn compile(&self, pattern: &str) -> Result<OnigPattern, EngineError> {
        let options = if self.capture_groups {
            RegexOptions::REGEX_OPTION_CAPTURE_GROUP
        } else {
            RegexOptions::REGEX_OPTION_NONE
        };
        let regex = Regex::with_options(pattern, options, Syntax::default())?;
        Ok(OnigPattern {
            regex,
            region: Region::new(),
        })
    }

    #[inline]
    fn search(
        &self,
        compiled: &mut OnigPattern,
        input: &str,
    ) -> Result<Option<usize>, EngineError> {
        let end = input.len();
        let region = if self.capture_groups {
            Some(&mut compiled.region)
        } else {
            None
        };
        let pos = compiled.regex.search_with_param(
            input,
            0,
            end,
            SearchOptions::SEARCH_OPTION_NONE,
            region,
            MatchParam::default(),
        )?;
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{DOLLAR_PATTERN, DUPLICATE_WORDS_PATTERN, URL_PATTERN};

    fn engine() -> OnigEngine {
        OnigEngine::from_options(&EngineOptions::default())
    }

    #[test]
    fn test_search_reports_byte_offset() {
        let engine = engine();
        let mut re = engine.compile(DOLLAR_PATTERN).unwrap();
        assert_eq!(engine.search(&mut re, "total: usd 1234.00").unwrap(), Some(7));
        // Multi-byte prefix: offsets are in bytes, not characters
        assert_eq!(engine.search(&mut re, "€ usd 5.00").unwrap(), Some(4));
        assert_eq!(engine.search(&mut re, "usd twelve").unwrap(), None);
    }

    #[test]
    fn test_capture_groups_recorded() {
        let engine = engine();
        let mut re = engine.compile(URL_PATTERN).unwrap();
        assert_eq!(engine.search(&mut re, "http://www.linux.com/").unwrap(), Some(0));
        assert_eq!(re.region.pos(3), Some((7, 20)));
    }

    #[test]
    fn test_without_capture_groups() {
        let engine = OnigEngine::from_options(&EngineOptions {
            capture_groups: false,
            ..EngineOptions::default()
        });
        let mut re = engine.compile(DUPLICATE_WORDS_PATTERN).unwrap();
        assert_eq!(engine.search(&mut re, "same same same").unwrap(), Some(0));
        assert_eq!(engine.search(&mut re, "he said she said").unwrap(), None);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(engine().compile("[unterminated").is_err());
    }
}
