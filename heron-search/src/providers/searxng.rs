//! SearXNG provider: self-hosted metasearch via its JSON API.
//!
//! Requires `format=json` to be enabled on the instance. The base URL is the
//! only setting; without it every search yields a missing-config sentinel.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::types::{ProviderKind, SearchFailure, SearchResult};

use super::{non_blank, sentinel_for};

/// Upper bound on results taken from one SearXNG page.
pub const SEARXNG_MAX_RESULTS: usize = 20;

/// SearXNG JSON API client.
#[derive(Debug, Clone)]
pub struct SearxngProvider {
    base_url: Option<String>,
    config: SearchConfig,
}

#[derive(Debug, Deserialize)]
struct SearxngResponse {
    results: Vec<SearxngItem>,
}

#[derive(Debug, Deserialize)]
struct SearxngItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl SearxngProvider {
    /// Create a provider from the SearXNG settings in `config`.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            base_url: non_blank(config.searxng_base_url.as_ref()),
            config: config.clone(),
        }
    }

    async fn fetch(&self, base_url: &str, query: &str) -> Result<String, SearchError> {
        let client = http::build_client(&self.config)?;
        let endpoint = format!("{}/search", base_url.trim_end_matches('/'));

        let response = client
            .get(&endpoint)
            .query(&[("q", query), ("format", "json")])
            .header("Accept", "application/json")
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

impl SearchProvider for SearxngProvider {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, count, "SearXNG search");

        let Some(base_url) = self.base_url.as_deref() else {
            tracing::warn!("SearXNG selected without SEARXNG_BASE_URL");
            return Ok(vec![SearchResult::sentinel(
                ProviderKind::Searxng,
                SearchFailure::MissingConfig,
                "SEARXNG_BASE_URL is not set",
            )]);
        };

        let limit = count.clamp(1, SEARXNG_MAX_RESULTS);
        let outcome = match self.fetch(base_url, query).await {
            Ok(body) => parse_searxng_json(&body, limit),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(results) => {
                tracing::debug!(count = results.len(), "SearXNG results parsed");
                Ok(results)
            }
            Err(e) => Ok(vec![sentinel_for(ProviderKind::Searxng, &e)]),
        }
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Searxng
    }
}

/// Parse a SearXNG JSON body into search results.
///
/// Items without a URL are skipped. Extracted as a separate function for
/// testability with canned bodies.
pub(crate) fn parse_searxng_json(body: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let parsed: SearxngResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(parsed
        .results
        .into_iter()
        .filter_map(|item| {
            let url = item.url.filter(|u| !u.trim().is_empty())?;
            Some(SearchResult::new(
                ProviderKind::Searxng,
                item.title.unwrap_or_default().trim(),
                url.trim(),
                item.content.unwrap_or_default(),
            ))
        })
        .take(limit)
        .collect())
}
