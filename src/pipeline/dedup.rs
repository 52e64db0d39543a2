//! Pre-ranking source deduplication.
//!
//! Collapses a merged, multi-batch source list to one entry per URL
//! key, keeping the first occurrence in input order. Because batches
//! are concatenated in execution order, the first search query wins
//! ties on content.

use std::collections::HashSet;

use crate::normalize::UrlNormalizer;
use crate::types::Source;

/// Deduplicates sources by URL key, first occurrence wins.
///
/// Input order is preserved for the surviving entries. Runs before
/// ranking, so the kept entry's provider score is the one that gets
/// blended.
pub fn dedup_sources(sources: Vec<Source>, normalizer: &dyn UrlNormalizer) -> Vec<Source> {
    let mut seen: HashSet<String> = HashSet::new();
    sources
        .into_iter()
        .filter(|source| seen.insert(normalizer.key(&source.url)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{CanonicalUrl, ExactUrl};
    use chrono::Utc;

    fn make_source(url: &str, title: &str) -> Source {
        Source {
            url: url.to_string(),
            title: title.to_string(),
            snippet: "snippet".into(),
            domain: "example.com".into(),
            discovered_at: Utc::now(),
            relevance_score: 0.5,
        }
    }

    #[test]
    fn unique_urls_pass_through() {
        let unique = dedup_sources(
            vec![
                make_source("https://a.com", "A"),
                make_source("https://b.com", "B"),
            ],
            &ExactUrl,
        );
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn first_occurrence_wins() {
        let unique = dedup_sources(
            vec![
                make_source("https://a.com", "From first batch"),
                make_source("https://a.com", "From second batch"),
            ],
            &ExactUrl,
        );
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].title, "From first batch");
    }

    #[test]
    fn input_order_preserved() {
        let unique = dedup_sources(
            vec![
                make_source("https://c.com", "C"),
                make_source("https://a.com", "A"),
                make_source("https://c.com", "C dup"),
                make_source("https://b.com", "B"),
            ],
            &ExactUrl,
        );
        let urls: Vec<&str> = unique.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["https://c.com", "https://a.com", "https://b.com"]);
    }

    #[test]
    fn exact_strategy_keeps_slash_variants() {
        let unique = dedup_sources(
            vec![
                make_source("https://a.com/p", "A"),
                make_source("https://a.com/p/", "A slash"),
            ],
            &ExactUrl,
        );
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn canonical_strategy_merges_slash_variants() {
        let unique = dedup_sources(
            vec![
                make_source("https://a.com/p", "A"),
                make_source("https://a.com/p/", "A slash"),
            ],
            &CanonicalUrl,
        );
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].title, "A");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(dedup_sources(vec![], &ExactUrl).is_empty());
    }
}
