//! Per-query repository assembly: dedup → rank → register.
//!
//! One call per top-level query. The returned repository is the
//! query's arena: building it fresh here is what makes cross-query
//! identifier leakage structurally impossible.

use crate::config::CitationConfig;
use crate::normalize::{ExactUrl, UrlNormalizer};
use crate::repository::SourceRepository;
use crate::types::Source;

use super::dedup::dedup_sources;
use super::ranking::rank_sources;

/// Assembles a fresh repository from the merged source lists of all
/// sub-queries, using strict URL equality for dedup.
///
/// # Pipeline
///
/// 1. Collapse to one entry per URL, first occurrence wins
/// 2. Blend provider scores with domain authority and sort descending
/// 3. Register the top `config.register_limit` sources, minting ids
///    in ranked order
pub fn assemble_repository(sources: Vec<Source>, config: &CitationConfig) -> SourceRepository {
    assemble_repository_with(sources, config, Box::new(ExactUrl))
}

/// [`assemble_repository`] with an explicit URL key strategy.
///
/// The same strategy drives both the pre-ranking dedup and the
/// repository's own duplicate detection, so the two can never
/// disagree on which URLs are the same document.
pub fn assemble_repository_with(
    sources: Vec<Source>,
    config: &CitationConfig,
    normalizer: Box<dyn UrlNormalizer>,
) -> SourceRepository {
    let merged = sources.len();
    let unique = dedup_sources(sources, normalizer.as_ref());
    let ranked = rank_sources(unique);
    tracing::debug!(merged, unique = ranked.len(), "deduplicated and ranked sources");

    let mut repository = SourceRepository::with_normalizer(normalizer);
    for source in ranked.into_iter().take(config.register_limit) {
        repository.add(source);
    }
    tracing::debug!(registered = repository.len(), "assembled query repository");
    repository
}
