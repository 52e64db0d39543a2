//! Per-query source registry: stable identifiers, URL dedup, bibliography.
//!
//! A [`SourceRepository`] is a short-lived value created fresh for each
//! top-level query (arena-per-request), so identifier reuse across
//! unrelated queries is structurally impossible rather than a caller
//! obligation. Within one lifetime the registry is append-only:
//! sources are never deleted, identifiers never reassigned.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use crate::normalize::{ExactUrl, UrlNormalizer};
use crate::types::{Source, SourceId};

/// Append-only, URL-deduplicated mapping from [`SourceId`] to [`Source`].
///
/// Insertion order is the single canonical ordering: citation numbers
/// are derived from it, and because identifiers are minted in the same
/// order, the bibliography's suffix sort agrees with it for every
/// repository-minted identifier.
pub struct SourceRepository {
    order: Vec<SourceId>,
    sources: HashMap<SourceId, Source>,
    url_index: HashMap<String, SourceId>,
    next_id: u64,
    normalizer: Box<dyn UrlNormalizer>,
}

impl Default for SourceRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceRepository {
    /// Fresh repository with the default [`ExactUrl`] key strategy.
    pub fn new() -> Self {
        Self::with_normalizer(Box::new(ExactUrl))
    }

    /// Fresh repository deduplicating by the given URL key strategy.
    pub fn with_normalizer(normalizer: Box<dyn UrlNormalizer>) -> Self {
        Self {
            order: Vec::new(),
            sources: HashMap::new(),
            url_index: HashMap::new(),
            next_id: 1,
            normalizer,
        }
    }

    /// Clears the mapping and restores the identifier counter to 1.
    ///
    /// Prefer constructing a fresh repository per query; `reset` exists
    /// for callers that must reuse an instance mid-flight (e.g. an
    /// abandoned query).
    pub fn reset(&mut self) {
        self.order.clear();
        self.sources.clear();
        self.url_index.clear();
        self.next_id = 1;
    }

    /// Registers a source, returning its identifier.
    ///
    /// Idempotent under duplicate URLs: if a source with the same URL
    /// key is already registered, the existing identifier is returned
    /// and nothing is mutated. Otherwise the next sequential identifier
    /// is minted and the source stored under it.
    pub fn add(&mut self, source: Source) -> SourceId {
        let key = self.normalizer.key(&source.url);
        if let Some(existing) = self.url_index.get(&key) {
            tracing::debug!(id = %existing, url = %source.url, "duplicate URL, reusing id");
            return existing.clone();
        }

        let id = SourceId::mint(self.next_id);
        self.next_id += 1;
        tracing::debug!(id = %id, url = %source.url, "registered source");

        self.url_index.insert(key, id.clone());
        self.order.push(id.clone());
        self.sources.insert(id.clone(), source);
        id
    }

    /// The source registered under `id`, if any.
    pub fn get(&self, id: &SourceId) -> Option<&Source> {
        self.sources.get(id)
    }

    /// 1-based position of `id` in insertion order; 0 when unknown.
    ///
    /// This is the number embedded in `[n]` citation markers. The 0
    /// sentinel is deliberate: an unknown identifier degrades, it does
    /// not fail.
    pub fn citation_number(&self, id: &SourceId) -> usize {
        self.order
            .iter()
            .position(|known| known == id)
            .map_or(0, |pos| pos + 1)
    }

    /// Registered sources in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&SourceId, &Source)> {
        self.order
            .iter()
            .filter_map(|id| self.sources.get(id).map(|source| (id, source)))
    }

    /// The first `limit` identifiers in insertion order.
    ///
    /// Callers use this for the inline-citation cap; the formatter
    /// itself accepts id lists of any length.
    pub fn leading_ids(&self, limit: usize) -> Vec<SourceId> {
        self.order.iter().take(limit).cloned().collect()
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the repository holds no sources.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Renders the numbered bibliography, capped at `limit` unique entries.
    ///
    /// Entries are ordered by the numeric suffix of their identifier
    /// (malformed suffixes sort last) and re-deduplicated on URL as a
    /// safety net. Each row renders as `N. [title](url) - domain`.
    pub fn format_bibliography(&self, limit: usize) -> String {
        let mut entries: Vec<(&SourceId, &Source)> = self.iter().collect();
        entries.sort_by_key(|(id, _)| id.index().unwrap_or(u64::MAX));

        let mut rendered = String::from("\n\n**Sources:**\n");
        let mut seen_urls: HashSet<&str> = HashSet::new();
        let mut row = 0;
        for (_, source) in entries {
            if row >= limit {
                break;
            }
            if !seen_urls.insert(source.url.as_str()) {
                continue;
            }
            row += 1;
            let _ = writeln!(
                rendered,
                "{row}. [{}]({}) - {}",
                source.title, source.url, source.domain
            );
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::CanonicalUrl;
    use chrono::Utc;

    fn make_source(url: &str, title: &str) -> Source {
        Source {
            url: url.to_string(),
            title: title.to_string(),
            snippet: format!("Snippet for {title}"),
            domain: "example.com".into(),
            discovered_at: Utc::now(),
            relevance_score: 0.5,
        }
    }

    #[test]
    fn add_mints_sequential_ids() {
        let mut repo = SourceRepository::new();
        let a = repo.add(make_source("https://a.com", "A"));
        let b = repo.add(make_source("https://b.com", "B"));
        let c = repo.add(make_source("https://c.com", "C"));
        assert_eq!(a.as_str(), "src_1");
        assert_eq!(b.as_str(), "src_2");
        assert_eq!(c.as_str(), "src_3");
    }

    #[test]
    fn duplicate_url_reuses_id_without_mutation() {
        let mut repo = SourceRepository::new();
        let first = repo.add(make_source("https://a.com", "Original"));
        let second = repo.add(make_source("https://a.com", "Replacement"));
        assert_eq!(first, second);
        assert_eq!(repo.len(), 1);
        // The original entry survives; the duplicate never overwrites it.
        assert_eq!(repo.get(&first).map(|s| s.title.as_str()), Some("Original"));
    }

    #[test]
    fn duplicate_does_not_advance_counter() {
        let mut repo = SourceRepository::new();
        repo.add(make_source("https://a.com", "A"));
        repo.add(make_source("https://a.com", "A again"));
        let next = repo.add(make_source("https://b.com", "B"));
        assert_eq!(next.as_str(), "src_2");
    }

    #[test]
    fn exact_equality_distinguishes_slash_variants() {
        let mut repo = SourceRepository::new();
        repo.add(make_source("https://a.com/page", "A"));
        repo.add(make_source("https://a.com/page/", "A slash"));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn canonical_normalizer_merges_slash_variants() {
        let mut repo = SourceRepository::with_normalizer(Box::new(CanonicalUrl));
        let a = repo.add(make_source("https://a.com/page", "A"));
        let b = repo.add(make_source("https://a.com/page/", "A slash"));
        assert_eq!(a, b);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn citation_number_follows_insertion_order() {
        let mut repo = SourceRepository::new();
        let a = repo.add(make_source("https://a.com", "A"));
        let b = repo.add(make_source("https://b.com", "B"));
        assert_eq!(repo.citation_number(&a), 1);
        assert_eq!(repo.citation_number(&b), 2);
    }

    #[test]
    fn citation_number_unknown_id_is_zero() {
        let repo = SourceRepository::new();
        assert_eq!(repo.citation_number(&SourceId::from("src_99")), 0);
        assert_eq!(repo.citation_number(&SourceId::from("bogus")), 0);
    }

    #[test]
    fn reset_clears_and_restarts_counter() {
        let mut repo = SourceRepository::new();
        repo.add(make_source("https://a.com", "A"));
        repo.add(make_source("https://b.com", "B"));
        repo.reset();
        assert!(repo.is_empty());
        let id = repo.add(make_source("https://c.com", "C"));
        assert_eq!(id.as_str(), "src_1");
    }

    #[test]
    fn ids_not_reused_without_reset() {
        let mut repo = SourceRepository::new();
        let mut last = 0;
        for n in 0..20 {
            let id = repo.add(make_source(&format!("https://site{n}.com"), "S"));
            let index = id.index().expect("minted ids are well-formed");
            assert!(index > last, "ids must be strictly increasing");
            last = index;
        }
    }

    #[test]
    fn leading_ids_respects_limit_and_order() {
        let mut repo = SourceRepository::new();
        for n in 0..8 {
            repo.add(make_source(&format!("https://site{n}.com"), "S"));
        }
        let leading = repo.leading_ids(5);
        assert_eq!(leading.len(), 5);
        assert_eq!(leading[0].as_str(), "src_1");
        assert_eq!(leading[4].as_str(), "src_5");
    }

    #[test]
    fn leading_ids_short_repository_returns_all() {
        let mut repo = SourceRepository::new();
        repo.add(make_source("https://a.com", "A"));
        assert_eq!(repo.leading_ids(5).len(), 1);
    }

    #[test]
    fn bibliography_lists_unique_entries_in_suffix_order() {
        let mut repo = SourceRepository::new();
        repo.add(make_source("https://a.com", "Alpha"));
        repo.add(make_source("https://b.com", "Beta"));
        let text = repo.format_bibliography(10);
        assert!(text.starts_with("\n\n**Sources:**\n"));
        assert!(text.contains("1. [Alpha](https://a.com) - example.com"));
        assert!(text.contains("2. [Beta](https://b.com) - example.com"));
    }

    #[test]
    fn bibliography_caps_at_limit() {
        let mut repo = SourceRepository::new();
        for n in 0..15 {
            repo.add(make_source(&format!("https://site{n}.com"), &format!("Title {n}")));
        }
        let text = repo.format_bibliography(10);
        assert!(text.contains("10. "));
        assert!(!text.contains("11. "));
    }

    #[test]
    fn scenario_duplicate_insertion() {
        // A.com, B.com, A.com: size 2, same id both times, two rows.
        let mut repo = SourceRepository::new();
        let a1 = repo.add(make_source("https://a.com", "A"));
        repo.add(make_source("https://b.com", "B"));
        let a2 = repo.add(make_source("https://a.com", "A dup"));
        assert_eq!(a1, a2);
        assert_eq!(repo.len(), 2);
        let text = repo.format_bibliography(10);
        assert!(text.contains("1. "));
        assert!(text.contains("2. "));
        assert!(!text.contains("3. "));
    }

    #[test]
    fn empty_repository_bibliography_is_header_only() {
        let repo = SourceRepository::new();
        assert_eq!(repo.format_bibliography(10), "\n\n**Sources:**\n");
    }

    #[test]
    fn iter_yields_insertion_order() {
        let mut repo = SourceRepository::new();
        repo.add(make_source("https://z.com", "Z"));
        repo.add(make_source("https://a.com", "A"));
        let titles: Vec<&str> = repo.iter().map(|(_, s)| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Z", "A"]);
    }
}
