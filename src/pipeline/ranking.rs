//! Domain-authority blended ranking.
//!
//! Each source's relevance becomes the arithmetic mean of its provider
//! score and a fixed domain-authority weight, then the list is sorted
//! descending. The sort is stable: equal scores keep their input
//! order, so ranking is reproducible.

use std::cmp::Ordering;

use crate::types::Source;

/// Authority weight for domains not in the static table.
pub const DEFAULT_DOMAIN_WEIGHT: f64 = 0.5;

/// Authority weight for a domain.
///
/// Lookup is by exact host match; `en.wikipedia.org` is not
/// `wikipedia.org` and takes the default weight.
pub fn domain_weight(domain: &str) -> f64 {
    match domain {
        "wikipedia.org" => 0.9,
        "stackoverflow.com" => 0.8,
        "github.com" => 0.8,
        "reddit.com" => 0.7,
        "medium.com" => 0.7,
        _ => DEFAULT_DOMAIN_WEIGHT,
    }
}

/// Blend of provider score and domain authority.
pub fn blend_score(provider_score: f64, domain_weight: f64) -> f64 {
    (provider_score + domain_weight) / 2.0
}

/// Ranks sources by blended relevance, highest first.
///
/// Takes the list by value, rewrites each `relevance_score` to the
/// blend, and stable-sorts descending. Deterministic, no external
/// calls; deduplication is expected to have run first.
pub fn rank_sources(mut sources: Vec<Source>) -> Vec<Source> {
    for source in &mut sources {
        source.relevance_score =
            blend_score(source.relevance_score, domain_weight(&source.domain));
    }
    sources.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
    });
    sources
}
