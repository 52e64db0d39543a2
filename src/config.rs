//! Citation configuration with sensible defaults.
//!
//! [`CitationConfig`] controls the caller-policy caps: how many sources
//! a query registers, how many are cited inline, how long the rendered
//! bibliography may grow, and the defaults substituted for missing
//! provider fields.

use crate::error::CitationError;

/// Configuration for one query's citation pipeline.
///
/// Use [`Default::default()`] for the standard caps, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct CitationConfig {
    /// Maximum number of ranked sources registered into the repository.
    pub register_limit: usize,
    /// Maximum number of leading sources cited inline. This is caller
    /// policy; the formatter itself accepts id lists of any length.
    pub citation_limit: usize,
    /// Maximum number of unique entries in the rendered bibliography.
    pub bibliography_limit: usize,
    /// Maximum snippet length in characters. Longer excerpts are truncated.
    pub snippet_max_chars: usize,
    /// Relevance score substituted when a provider hit carries none.
    pub default_relevance: f64,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            register_limit: 10,
            citation_limit: 5,
            bibliography_limit: 10,
            snippet_max_chars: 800,
            default_relevance: 0.5,
        }
    }
}

impl CitationConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `register_limit`, `citation_limit`, and `bibliography_limit` must be greater than 0
    /// - `snippet_max_chars` must be greater than 0
    /// - `default_relevance` must be a finite value in `[0, 1]`
    pub fn validate(&self) -> Result<(), CitationError> {
        if self.register_limit == 0 {
            return Err(CitationError::Config(
                "register_limit must be greater than 0".into(),
            ));
        }
        if self.citation_limit == 0 {
            return Err(CitationError::Config(
                "citation_limit must be greater than 0".into(),
            ));
        }
        if self.bibliography_limit == 0 {
            return Err(CitationError::Config(
                "bibliography_limit must be greater than 0".into(),
            ));
        }
        if self.snippet_max_chars == 0 {
            return Err(CitationError::Config(
                "snippet_max_chars must be greater than 0".into(),
            ));
        }
        if !self.default_relevance.is_finite()
            || !(0.0..=1.0).contains(&self.default_relevance)
        {
            return Err(CitationError::Config(
                "default_relevance must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}
