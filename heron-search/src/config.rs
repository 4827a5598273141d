//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] carries per-provider credentials and endpoints, the
//! per-request timeout, and the normalisation limits. Where these values come
//! from (environment, files) is the host's business.

use crate::error::SearchError;

/// Default Brave web search API endpoint.
pub const DEFAULT_BRAVE_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

/// Configuration shared by every provider and the normaliser.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of a SearXNG instance. Required by the SearXNG provider.
    pub searxng_base_url: Option<String>,
    /// Brave Search subscription token. Required by the Brave provider.
    pub brave_api_key: Option<String>,
    /// Brave web search endpoint.
    pub brave_endpoint: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Snippets longer than this many characters are truncated.
    pub snippet_max_chars: usize,
    /// Maximum number of URLs listed in the generated Sources block.
    pub max_citations: usize,
    /// User-Agent sent with provider requests.
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            searxng_base_url: None,
            brave_api_key: None,
            brave_endpoint: DEFAULT_BRAVE_ENDPOINT.to_owned(),
            timeout_seconds: 20,
            snippet_max_chars: 400,
            max_citations: 5,
            user_agent: format!("heron-search/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `snippet_max_chars` must be greater than 0
    /// - `max_citations` must be greater than 0
    ///
    /// Missing provider credentials are *not* a validation failure: the
    /// affected provider reports them as a sentinel result instead.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.snippet_max_chars == 0 {
            return Err(SearchError::Config(
                "snippet_max_chars must be greater than 0".into(),
            ));
        }
        if self.max_citations == 0 {
            return Err(SearchError::Config(
                "max_citations must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
