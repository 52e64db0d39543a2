//! Error types for the atlas-citations crate.
//!
//! The citation core favours silent degradation over failure: unknown
//! identifiers yield sentinel values, malformed inbound records are
//! defaulted, and empty citation lists score zero confidence. Errors
//! are reserved for invalid configuration, which is a caller bug
//! rather than bad data.

/// Errors that can occur in the citation core.
#[derive(Debug, thiserror::Error)]
pub enum CitationError {
    /// Invalid citation configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for atlas-citations results.
pub type Result<T> = std::result::Result<T, CitationError>;
