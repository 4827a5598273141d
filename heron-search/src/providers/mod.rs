//! Search provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::SearchProvider`].

pub mod brave;
pub mod searxng;
pub mod stub;

pub use brave::BraveProvider;
pub use searxng::SearxngProvider;
pub use stub::StubProvider;

use crate::error::SearchError;
use crate::types::{ProviderKind, SearchFailure, SearchResult};

/// Fold a provider-side error into the single sentinel result callers see.
pub(crate) fn sentinel_for(kind: ProviderKind, err: &SearchError) -> SearchResult {
    tracing::warn!(provider = %kind, error = %err, "provider search failed");
    match err {
        SearchError::Parse(msg) => SearchResult::sentinel(
            kind,
            SearchFailure::Decode,
            &format!("search failed: malformed response: {msg}"),
        ),
        SearchError::Config(msg) => SearchResult::sentinel(kind, SearchFailure::MissingConfig, msg),
        SearchError::Http(msg) | SearchError::UnknownProvider(msg) | SearchError::Batch(msg) => {
            SearchResult::sentinel(kind, SearchFailure::Transport, &format!("search failed: {msg}"))
        }
    }
}

/// Treat unset and blank settings alike.
pub(crate) fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
