//! # atlas-citations
//!
//! Citation management and source ranking for Atlas's research pipeline.
//!
//! This crate owns the logic that turns raw, possibly-duplicated,
//! unordered search hits into a stable, citable, ranked source list —
//! and a synthesized answer into a citation-annotated document with a
//! numbered bibliography. It compiles into the assistant binary as a
//! library dependency.
//!
//! ## Design
//!
//! - A fresh [`SourceRepository`] per top-level query assigns stable
//!   `src_<n>` identifiers, deduplicated by URL
//! - Ranking blends provider relevance with a fixed domain-authority
//!   table; the stable sort keeps results reproducible
//! - Citation markers and bibliography rows both derive from the
//!   repository's single insertion ordering
//! - Bad caller input degrades silently: unknown ids render a `[0]`
//!   sentinel, malformed provider hits are defaulted, never rejected
//!
//! ## Scope
//!
//! - No network, no async, no persistence — pure data transformation
//! - Search-provider and language-model integration live in the
//!   surrounding process, behind narrow data-only interfaces
//! - Query text is logged only at trace level

pub mod config;
pub mod error;
pub mod formatter;
pub mod normalize;
pub mod pipeline;
pub mod repository;
pub mod types;

pub use config::CitationConfig;
pub use error::{CitationError, Result};
pub use formatter::{confidence, source_digest, AppendToEnd, CitationFormatter, CitationPlacement};
pub use normalize::{CanonicalUrl, ExactUrl, UrlNormalizer};
pub use pipeline::assemble::{assemble_repository, assemble_repository_with};
pub use repository::SourceRepository;
pub use types::{CitedContent, RawHit, SearchBatch, Source, SourceId};

/// Annotate a synthesized answer and render the final response.
///
/// Cites the repository's leading `config.citation_limit` sources in
/// insertion order, computes the confidence score, and appends the
/// rendered bibliography.
///
/// # Errors
///
/// Returns [`CitationError::Config`] if `config` fails validation.
/// Everything else degrades silently: an empty repository yields an
/// unannotated answer with zero confidence and an empty bibliography.
///
/// # Examples
///
/// ```
/// # fn example() -> atlas_citations::Result<()> {
/// use atlas_citations::{assemble_repository, cite, CitationConfig};
///
/// let config = CitationConfig::default();
/// let repo = assemble_repository(vec![], &config);
/// let (cited, response) = cite(&repo, "An answer.", &config)?;
/// assert_eq!(cited.confidence, 0.0);
/// assert!(response.contains("**Sources:**"));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn cite(
    repository: &SourceRepository,
    text: &str,
    config: &CitationConfig,
) -> Result<(CitedContent, String)> {
    config.validate()?;
    let formatter = CitationFormatter::new();
    let ids = repository.leading_ids(config.citation_limit);
    let cited = formatter.cited_content(repository, text, &ids);
    let response = formatter.final_response(repository, &cited, config.bibliography_limit);
    Ok((cited, response))
}
