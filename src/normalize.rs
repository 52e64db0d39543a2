//! URL key strategies for duplicate detection.
//!
//! The repository and the pre-ranking dedup both compare sources by a
//! URL key. The default, [`ExactUrl`], is strict string equality: URLs
//! differing only by trailing slash, scheme case, or tracking
//! parameters count as distinct documents. [`CanonicalUrl`] is the
//! opt-in alternative that canonicalises before comparing — choosing
//! it is an explicit caller decision, never a silent behaviour change.

use url::Url;

/// Tracking query parameters stripped by [`CanonicalUrl`].
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "ref",
    "si",
    "feature",
];

/// Maps a URL to the key used for duplicate detection.
///
/// Two sources are considered the same document exactly when their
/// keys are equal. Implementations must be deterministic.
pub trait UrlNormalizer: Send + Sync {
    /// The dedup key for `url`.
    fn key(&self, url: &str) -> String;
}

/// Strict string equality. The documented default.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactUrl;

impl UrlNormalizer for ExactUrl {
    fn key(&self, url: &str) -> String {
        url.to_string()
    }
}

/// Canonicalising key: equivalent pages compare equal.
///
/// Applies, in order:
///
/// 1. Fragment removal.
/// 2. Default-port removal (`:80` for HTTP, `:443` for HTTPS).
/// 3. Tracking-parameter stripping and alphabetical query-pair sort.
/// 4. Trailing-slash removal (unless the path is exactly `/`).
///
/// Scheme and host are lowercased by URL parsing itself. Inputs that
/// fail to parse as URLs are keyed unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanonicalUrl;

impl UrlNormalizer for CanonicalUrl {
    fn key(&self, url: &str) -> String {
        let Ok(mut parsed) = Url::parse(url) else {
            return url.to_string();
        };

        parsed.set_fragment(None);

        if is_default_port(&parsed) {
            let _ = parsed.set_port(None);
        }

        let mut params: Vec<(String, String)> = parsed
            .query_pairs()
            .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        params.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        if params.is_empty() {
            parsed.set_query(None);
        } else {
            let query = params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&");
            parsed.set_query(Some(&query));
        }

        let path = parsed.path().to_string();
        if path.len() > 1 && path.ends_with('/') {
            parsed.set_path(&path[..path.len() - 1]);
        }

        parsed.to_string()
    }
}

fn is_default_port(url: &Url) -> bool {
    matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    )
}
