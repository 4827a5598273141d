//! Core types for search results and provider identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// A single search result returned by a provider.
///
/// Results are never mutated once built; normalisation produces new values.
/// A result with `failure` set is a *sentinel*: it stands in for a search
/// that did not succeed and carries the explanation in `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result page, or the failure explanation for sentinels.
    pub title: String,
    /// The URL of the result. Empty for stub providers and sentinels.
    #[serde(default)]
    pub url: String,
    /// A text snippet summarising the page. May be empty.
    #[serde(default)]
    pub snippet: String,
    /// Which provider produced this result.
    pub provider: ProviderKind,
    /// Failure class when this result is a sentinel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<SearchFailure>,
}

impl SearchResult {
    /// Build an ordinary (non-sentinel) result.
    pub fn new(
        provider: ProviderKind,
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            provider,
            failure: None,
        }
    }

    /// Build a sentinel result describing a failed search.
    ///
    /// The title is prefixed with the provider tag, e.g.
    /// `[SEARXNG] SEARXNG_BASE_URL is not set`.
    pub fn sentinel(provider: ProviderKind, failure: SearchFailure, message: &str) -> Self {
        Self {
            title: format!("[{}] {message}", provider.tag()),
            url: String::new(),
            snippet: String::new(),
            provider,
            failure: Some(failure),
        }
    }

    /// Returns `true` if this result stands in for a failed search.
    pub fn is_sentinel(&self) -> bool {
        self.failure.is_some()
    }

    /// Return a copy with the URL replaced.
    pub fn with_url(&self, url: String) -> Self {
        Self {
            url,
            ..self.clone()
        }
    }

    /// Return a copy with the snippet replaced.
    pub fn with_snippet(&self, snippet: String) -> Self {
        Self {
            snippet,
            ..self.clone()
        }
    }
}

/// Why a provider could not produce real results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFailure {
    /// A required backend setting (base URL, API key) is absent.
    MissingConfig,
    /// Network failure, timeout, or a non-success HTTP status.
    Transport,
    /// The backend answered but the body was not in the expected shape.
    Decode,
}

impl SearchFailure {
    /// Stable machine-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingConfig => "missing_config",
            Self::Transport => "transport",
            Self::Decode => "decode",
        }
    }
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The closed set of search backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Deterministic stub, default provider.
    #[serde(rename = "fakeA")]
    FakeA,
    /// Deterministic stub with a different title prefix.
    #[serde(rename = "fakeB")]
    FakeB,
    /// Self-hosted SearXNG instance (JSON API).
    #[serde(rename = "searxng")]
    Searxng,
    /// Brave Search web API.
    #[serde(rename = "brave")]
    Brave,
}

impl ProviderKind {
    /// Returns the canonical identifier of this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FakeA => "fakeA",
            Self::FakeB => "fakeB",
            Self::Searxng => "searxng",
            Self::Brave => "brave",
        }
    }

    /// Returns the bracketed tag used in result titles.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::FakeA => "FAKE-A",
            Self::FakeB => "FAKE-B",
            Self::Searxng => "SEARXNG",
            Self::Brave => "BRAVE",
        }
    }

    /// Whether this provider is a pure stub with no I/O.
    pub fn is_stub(&self) -> bool {
        matches!(self, Self::FakeA | Self::FakeB)
    }

    /// Returns all provider variants.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::FakeA, Self::FakeB, Self::Searxng, Self::Brave]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = SearchError;

    /// Resolve a user-supplied identifier, accepting the short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fakea" | "fake" | "a" => Ok(Self::FakeA),
            "fakeb" | "b" => Ok(Self::FakeB),
            "searxng" | "sx" => Ok(Self::Searxng),
            "brave" => Ok(Self::Brave),
            _ => {
                let valid: Vec<&str> = Self::all().iter().map(ProviderKind::name).collect();
                Err(SearchError::UnknownProvider(format!(
                    "'{}' (expected one of: {})",
                    s.trim(),
                    valid.join(", ")
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_construction() {
        let result = SearchResult::new(
            ProviderKind::Searxng,
            "Example",
            "https://example.com",
            "An example page",
        );
        assert_eq!(result.title, "Example");
        assert_eq!(result.provider, ProviderKind::Searxng);
        assert!(!result.is_sentinel());
    }

    #[test]
    fn sentinel_title_carries_tag_and_message() {
        let result = SearchResult::sentinel(
            ProviderKind::Searxng,
            SearchFailure::MissingConfig,
            "SEARXNG_BASE_URL is not set",
        );
        assert_eq!(result.title, "[SEARXNG] SEARXNG_BASE_URL is not set");
        assert!(result.url.is_empty());
        assert!(result.snippet.is_empty());
        assert!(result.is_sentinel());
        assert_eq!(result.failure, Some(SearchFailure::MissingConfig));
    }

    #[test]
    fn with_url_leaves_original_untouched() {
        let original = SearchResult::new(ProviderKind::Brave, "T", "https://a.com/?utm_source=x", "");
        let updated = original.with_url("https://a.com/".into());
        assert_eq!(original.url, "https://a.com/?utm_source=x");
        assert_eq!(updated.url, "https://a.com/");
        assert_eq!(updated.title, "T");
    }

    #[test]
    fn serde_uses_canonical_provider_names() {
        let result = SearchResult::new(ProviderKind::FakeA, "T", "", "");
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["provider"], "fakeA");
        assert!(json.get("failure").is_none());

        let sentinel = SearchResult::sentinel(ProviderKind::Brave, SearchFailure::Decode, "bad");
        let json = serde_json::to_value(&sentinel).expect("serialize");
        assert_eq!(json["failure"], "decode");
    }

    #[test]
    fn deserialize_defaults_missing_url_and_snippet() {
        let json = r#"{"title":"T","provider":"fakeB"}"#;
        let decoded: SearchResult = serde_json::from_str(json).expect("deserialize");
        assert_eq!(decoded.provider, ProviderKind::FakeB);
        assert!(decoded.url.is_empty());
        assert!(decoded.failure.is_none());
    }

    #[test]
    fn provider_display_and_tag() {
        assert_eq!(ProviderKind::FakeA.to_string(), "fakeA");
        assert_eq!(ProviderKind::Searxng.to_string(), "searxng");
        assert_eq!(ProviderKind::FakeB.tag(), "FAKE-B");
        assert_eq!(ProviderKind::Brave.tag(), "BRAVE");
    }

    #[test]
    fn provider_all_and_stub_flag() {
        let all = ProviderKind::all();
        assert_eq!(all.len(), 4);
        assert!(ProviderKind::FakeA.is_stub());
        assert!(ProviderKind::FakeB.is_stub());
        assert!(!ProviderKind::Searxng.is_stub());
        assert!(!ProviderKind::Brave.is_stub());
    }

    #[test]
    fn provider_parses_aliases_case_insensitively() {
        assert_eq!("fakeA".parse::<ProviderKind>().ok(), Some(ProviderKind::FakeA));
        assert_eq!("FAKE".parse::<ProviderKind>().ok(), Some(ProviderKind::FakeA));
        assert_eq!("fakeb".parse::<ProviderKind>().ok(), Some(ProviderKind::FakeB));
        assert_eq!("sx".parse::<ProviderKind>().ok(), Some(ProviderKind::Searxng));
        assert_eq!(" Brave ".parse::<ProviderKind>().ok(), Some(ProviderKind::Brave));
    }

    #[test]
    fn unknown_provider_is_structured_error() {
        let err = "bing".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, SearchError::UnknownProvider(_)));
        let msg = err.to_string();
        assert!(msg.contains("'bing'"));
        assert!(msg.contains("fakeA, fakeB, searxng, brave"));
    }

    #[test]
    fn search_failure_names() {
        assert_eq!(SearchFailure::MissingConfig.to_string(), "missing_config");
        assert_eq!(SearchFailure::Transport.name(), "transport");
    }
}
