//! Core types for discovered sources, search batches, and cited content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix carried by every repository-minted identifier.
pub(crate) const ID_PREFIX: &str = "src_";

/// Opaque identifier naming a [`Source`] within one query's repository.
///
/// The repository mints identifiers of the form `src_<n>` with `n`
/// strictly increasing from 1. Identifiers are never reused or
/// reassigned within one repository lifetime; a duplicate URL reuses
/// the existing identifier instead of minting a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Mints the identifier for ordinal `n`. Repository use only.
    pub(crate) fn mint(n: u64) -> Self {
        Self(format!("{ID_PREFIX}{n}"))
    }

    /// The rendered token, e.g. `src_3`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of the identifier, or `None` when malformed.
    ///
    /// Used by the bibliography to sort entries; malformed identifiers
    /// sort after every well-formed one rather than raising.
    pub fn index(&self) -> Option<u64> {
        self.0.rsplit('_').next().and_then(|n| n.parse().ok())
    }
}

impl From<&str> for SourceId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for SourceId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A discovered document.
///
/// Carries no identifier: the repository exclusively owns the mapping
/// from [`SourceId`] to `Source`, so an identifier can only ever be
/// assigned by insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// The URL of the document. Unique key within one repository.
    pub url: String,
    /// The document title.
    pub title: String,
    /// Bounded-length text excerpt from the document.
    pub snippet: String,
    /// Host extracted from `url` (`"unknown"` when unparseable).
    pub domain: String,
    /// When this source was discovered.
    pub discovered_at: DateTime<Utc>,
    /// Relevance score. Holds the provider score on ingest; ranking
    /// rewrites it to the domain-authority blend.
    pub relevance_score: f64,
}

/// A raw hit record from a search provider, prior to ingest.
///
/// Every field is optional: missing data is substituted with defaults
/// during ingest, never rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHit {
    /// The URL of the hit. May be empty.
    #[serde(default)]
    pub url: String,
    /// Page title, if the provider supplied one.
    #[serde(default)]
    pub title: Option<String>,
    /// Full-text content extract.
    #[serde(default)]
    pub content: Option<String>,
    /// Shorter snippet, used when `content` is missing or too thin.
    #[serde(default)]
    pub snippet: Option<String>,
    /// Provider relevance score.
    #[serde(default)]
    pub score: Option<f64>,
}

/// One search sub-query execution record.
///
/// Immutable after creation; kept for logging and audit only — the
/// citation logic never consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchBatch {
    /// The sub-query string that was executed.
    pub query: String,
    /// The sources this sub-query produced, in provider order.
    pub sources: Vec<Source>,
    /// Number of sources produced.
    pub total_results: usize,
    /// When the search was executed.
    pub searched_at: DateTime<Utc>,
}

/// A synthesized answer annotated with citation markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitedContent {
    /// Text with inline `[n]` citation markers inserted.
    pub content: String,
    /// The identifiers actually cited, in citation order. Duplicates allowed.
    pub source_ids: Vec<SourceId>,
    /// Mean relevance of the cited sources, clamped to at most 1.0.
    pub confidence: f64,
}
