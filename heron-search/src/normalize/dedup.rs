//! Result deduplication by canonical location.
//!
//! Two results refer to the same page when their canonical URLs share a
//! lowercased host and a path. The first occurrence wins; later ones are
//! dropped, not merged. Runs on one provider response at a time.

use std::collections::HashSet;

use url::Url;

use crate::types::SearchResult;

use super::url_normalize::canonicalize_url;

/// Dedup key derived from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocationKey {
    /// `(host lowercased, path)` of a parseable URL.
    Location { host: String, path: String },
    /// Lowercased raw string of a URL that does not parse.
    Raw(String),
}

/// Compute the canonical location of a URL.
pub fn location_key(raw: &str) -> LocationKey {
    let canonical = canonicalize_url(raw);
    match Url::parse(&canonical) {
        Ok(url) => LocationKey::Location {
            host: url.host_str().unwrap_or_default().to_lowercase(),
            path: url.path().to_owned(),
        },
        Err(_) => LocationKey::Raw(raw.trim().to_lowercase()),
    }
}

/// Keep the first result per canonical location, preserving input order.
///
/// Results with an empty URL have no location (stub results, sentinels) and
/// are always kept.
pub fn dedupe(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen: HashSet<LocationKey> = HashSet::new();
    let before = results.len();

    let kept: Vec<SearchResult> = results
        .into_iter()
        .filter(|r| r.url.trim().is_empty() || seen.insert(location_key(&r.url)))
        .collect();

    if kept.len() < before {
        tracing::debug!(dropped = before - kept.len(), "duplicate results dropped");
    }
    kept
}
