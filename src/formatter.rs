//! Citation marker placement, confidence scoring, and response rendering.
//!
//! The formatter turns synthesized text plus an ordered id list into a
//! [`CitedContent`] record. Marker placement is a pluggable policy;
//! the built-in [`AppendToEnd`] strategy concatenates every marker
//! onto the final sentence. Per-claim placement is a deliberate
//! non-feature of this strategy, not an oversight — a future policy
//! can distribute markers without touching the default contract.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::repository::SourceRepository;
use crate::types::{CitedContent, SourceId};

/// Whitespace run following sentence-ending punctuation.
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary pattern is valid"));

/// Policy deciding where a citation marker lands in a text.
pub trait CitationPlacement: Send + Sync {
    /// Returns `text` with `marker` inserted.
    fn place(&self, text: &str, marker: &str) -> String;
}

/// Appends the marker after the final sentence.
///
/// The text is split on whitespace following `.`, `!`, or `?`, the
/// marker is appended to the last sentence, and the sentences are
/// rejoined with single spaces. Applying N markers therefore stacks
/// all of them onto the end of the text, in application order.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppendToEnd;

impl CitationPlacement for AppendToEnd {
    fn place(&self, text: &str, marker: &str) -> String {
        let mut sentences = split_sentences(text);
        if let Some(last) = sentences.last_mut() {
            last.push_str(marker);
        }
        sentences.join(" ")
    }
}

/// Splits on whitespace that follows sentence-ending punctuation,
/// keeping the punctuation with the preceding sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // The punctuation char is ASCII; keep it with the sentence.
        let punct_end = boundary.start() + 1;
        sentences.push(text[start..punct_end].to_string());
        start = boundary.end();
    }
    sentences.push(text[start..].to_string());
    sentences
}

/// Annotates text with citation markers and scores the result.
pub struct CitationFormatter {
    placement: Box<dyn CitationPlacement>,
}

impl Default for CitationFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CitationFormatter {
    /// Formatter with the default [`AppendToEnd`] placement.
    pub fn new() -> Self {
        Self::with_placement(Box::new(AppendToEnd))
    }

    /// Formatter with an explicit placement policy.
    pub fn with_placement(placement: Box<dyn CitationPlacement>) -> Self {
        Self { placement }
    }

    /// Inserts one `[n]` marker per id, in order.
    ///
    /// `n` is the repository's citation number for the id; unknown ids
    /// render the `[0]` sentinel rather than failing. Accepts id lists
    /// of any length — capping is caller policy.
    pub fn annotate(&self, repository: &SourceRepository, text: &str, ids: &[SourceId]) -> String {
        let mut annotated = text.to_string();
        for id in ids {
            let marker = format!("[{}]", repository.citation_number(id));
            annotated = self.placement.place(&annotated, &marker);
        }
        annotated
    }

    /// Annotates `content` and packages it with its confidence score.
    pub fn cited_content(
        &self,
        repository: &SourceRepository,
        content: &str,
        ids: &[SourceId],
    ) -> CitedContent {
        CitedContent {
            content: self.annotate(repository, content, ids),
            source_ids: ids.to_vec(),
            confidence: confidence(repository, ids),
        }
    }

    /// Annotated content followed by the rendered bibliography.
    pub fn final_response(
        &self,
        repository: &SourceRepository,
        cited: &CitedContent,
        bibliography_limit: usize,
    ) -> String {
        format!(
            "{}{}",
            cited.content,
            repository.format_bibliography(bibliography_limit)
        )
    }
}

/// Mean relevance of the cited sources, clamped to at most 1.0.
///
/// Identifiers absent from the repository are skipped entirely: they
/// neither contribute relevance nor count toward the denominator. An
/// empty id list, or one where nothing resolves, scores 0.0.
pub fn confidence(repository: &SourceRepository, ids: &[SourceId]) -> f64 {
    if ids.is_empty() {
        return 0.0;
    }
    let scores: Vec<f64> = ids
        .iter()
        .filter_map(|id| repository.get(id))
        .map(|source| source.relevance_score)
        .collect();
    if scores.is_empty() {
        return 0.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    mean.min(1.0)
}

/// Numbered digest of every registered source, for downstream
/// synthesis. Insertion order, full snippet, two-decimal relevance.
pub fn source_digest(repository: &SourceRepository) -> String {
    let mut digest = String::new();
    for (row, (_, source)) in repository.iter().enumerate() {
        digest.push_str(&format!(
            "## Source {} - {}\n**Title:** {}\n**Content:** {}\n**URL:** {}\n**Relevance:** {:.2}\n\n",
            row + 1,
            source.domain,
            source.title,
            source.snippet,
            source.url,
            source.relevance_score,
        ));
    }
    digest
}
