//! Conversion of raw provider hits into [`Source`] records.
//!
//! Providers are messy: fields go missing, snippets run long, URLs
//! fail to parse. Ingest never rejects a hit — every gap is filled
//! with a default and every excess is truncated.

use chrono::{DateTime, Utc};
use url::Url;

use crate::config::CitationConfig;
use crate::types::{RawHit, SearchBatch, Source};

/// Content shorter than this falls back to the provider snippet.
const THIN_CONTENT_CHARS: usize = 200;

/// Host portion of `url`, or `"unknown"` when unparseable.
pub fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Builds a [`Source`] from one raw hit.
///
/// Defaulting rules:
/// - excerpt prefers `content`, falling back to `snippet` when the
///   content is missing or thinner than 200 characters
/// - excerpt is truncated to `config.snippet_max_chars` characters
/// - missing `title` becomes `Source <position + 1>` (1-based)
/// - missing `score` becomes `config.default_relevance`
pub fn source_from_hit(
    hit: RawHit,
    position: usize,
    now: DateTime<Utc>,
    config: &CitationConfig,
) -> Source {
    let mut excerpt = hit
        .content
        .clone()
        .or_else(|| hit.snippet.clone())
        .unwrap_or_default();
    if excerpt.chars().count() < THIN_CONTENT_CHARS {
        if let Some(snippet) = &hit.snippet {
            excerpt = snippet.clone();
        }
    }

    Source {
        domain: extract_domain(&hit.url),
        title: hit
            .title
            .unwrap_or_else(|| format!("Source {}", position + 1)),
        snippet: truncate_chars(&excerpt, config.snippet_max_chars),
        url: hit.url,
        discovered_at: now,
        relevance_score: hit.score.unwrap_or(config.default_relevance),
    }
}

/// Builds the audit record for one executed sub-query.
pub fn batch_from_hits(
    query: &str,
    hits: Vec<RawHit>,
    now: DateTime<Utc>,
    config: &CitationConfig,
) -> SearchBatch {
    let sources: Vec<Source> = hits
        .into_iter()
        .enumerate()
        .map(|(position, hit)| source_from_hit(hit, position, now, config))
        .collect();
    tracing::debug!(query, count = sources.len(), "ingested search batch");
    SearchBatch {
        query: query.to_string(),
        total_results: sources.len(),
        sources,
        searched_at: now,
    }
}

/// First `max` characters of `text`, cut on a char boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
