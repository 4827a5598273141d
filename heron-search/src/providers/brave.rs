//! Brave Search provider: independent index via the web search API.
//!
//! Needs a subscription token. Brave caps `count` at 20 per request, so the
//! requested count is clamped before it is sent.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::types::{ProviderKind, SearchFailure, SearchResult};

use super::{non_blank, sentinel_for};

/// Largest `count` the Brave API accepts.
pub const BRAVE_MAX_RESULTS: usize = 20;

/// Brave web search API client.
#[derive(Debug, Clone)]
pub struct BraveProvider {
    api_key: Option<String>,
    config: SearchConfig,
}

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveItem>,
}

#[derive(Debug, Deserialize)]
struct BraveItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl BraveProvider {
    /// Create a provider from the Brave settings in `config`.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            api_key: non_blank(config.brave_api_key.as_ref()),
            config: config.clone(),
        }
    }

    async fn fetch(&self, api_key: &str, query: &str, count: usize) -> Result<String, SearchError> {
        let client = http::build_client(&self.config)?;
        let count = count.to_string();

        let response = client
            .get(&self.config.brave_endpoint)
            .query(&[("q", query), ("count", count.as_str())])
            .header("Accept", "application/json")
            .header("X-Subscription-Token", api_key)
            .send()
            .await
            .map_err(|e| SearchError::Http(http::describe_transport_error(&e)))?
            .error_for_status()
            .map_err(|e| SearchError::Http(http::describe_transport_error(&e)))?;

        response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("response read failed: {e}")))
    }
}

impl SearchProvider for BraveProvider {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, count, "Brave search");

        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("Brave selected without BRAVE_API_KEY");
            return Ok(vec![SearchResult::sentinel(
                ProviderKind::Brave,
                SearchFailure::MissingConfig,
                "BRAVE_API_KEY is not set",
            )]);
        };

        let count = count.clamp(1, BRAVE_MAX_RESULTS);
        let outcome = match self.fetch(api_key, query, count).await {
            Ok(body) => parse_brave_json(&body, count),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(results) => {
                tracing::debug!(count = results.len(), "Brave results parsed");
                Ok(results)
            }
            Err(e) => Ok(vec![sentinel_for(ProviderKind::Brave, &e)]),
        }
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Brave
    }
}

/// Parse a Brave web search JSON body into search results.
///
/// A body without a `web` section means "no web results", not an error.
pub(crate) fn parse_brave_json(body: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let parsed: BraveResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    let items = parsed.web.map(|w| w.results).unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| {
            let url = item.url.filter(|u| !u.trim().is_empty())?;
            Some(SearchResult::new(
                ProviderKind::Brave,
                item.title.unwrap_or_default().trim(),
                url.trim(),
                item.description.unwrap_or_default(),
            ))
        })
        .take(limit)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "type": "search",
        "web": {
            "type": "search",
            "results": [
                {"title": "Rust", "url": "https://www.rust-lang.org/", "description": "Reliable and efficient software."},
                {"title": "Crates", "url": "https://crates.io/", "description": "The Rust package registry."},
                {"title": "Blank", "url": "", "description": "skipped"}
            ]
        }
    }"#;

    #[test]
    fn parses_web_results() {
        let results = parse_brave_json(BODY, 20).expect("should parse");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust");
        assert_eq!(results[0].snippet, "Reliable and efficient software.");
        assert_eq!(results[1].url, "https://crates.io/");
        assert!(results.iter().all(|r| r.provider == ProviderKind::Brave));
    }

    #[test]
    fn parse_respects_limit() {
        assert_eq!(parse_brave_json(BODY, 1).expect("should parse").len(), 1);
    }

    #[test]
    fn missing_web_section_is_empty() {
        let results = parse_brave_json(r#"{"type": "search"}"#, 5).expect("should parse");
        assert!(results.is_empty());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = parse_brave_json("not json", 5).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_key_yields_named_sentinel() {
        let provider = BraveProvider::new(&SearchConfig::default());
        let results = provider.search("rust", 3).await.expect("never errors");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "[BRAVE] BRAVE_API_KEY is not set");
        assert_eq!(results[0].failure, Some(SearchFailure::MissingConfig));
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BraveProvider>();
    }
}
