//! The uniform provider contract and provider resolution.
//!
//! Each backend (two deterministic stubs, SearXNG, Brave) implements
//! [`SearchProvider`]. Callers resolve a [`ProviderKind`] (or a raw
//! identifier) into a concrete [`Provider`] once, at the boundary, and
//! hand that value to the executor.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::providers::{BraveProvider, SearxngProvider, StubProvider};
use crate::types::{ProviderKind, SearchResult};

/// A pluggable search backend.
///
/// Implementors turn `(query, count)` into an ordered list of results. Each
/// backend handles its own:
///
/// - request construction and query encoding
/// - per-request timeout
/// - clamping `count` into the range the backend allows
/// - converting ordinary failures (missing configuration, network errors,
///   undecodable responses) into a single sentinel result
///
/// `Err` is reserved for failures the backend cannot express as a result;
/// the built-in providers never return it.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
pub trait SearchProvider: Send + Sync {
    /// Run one search and return at most `count` results in backend order.
    fn search(
        &self,
        query: &str,
        count: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Returns which [`ProviderKind`] this implementation represents.
    fn kind(&self) -> ProviderKind;
}

/// A provider resolved from the closed [`ProviderKind`] catalogue.
#[derive(Debug, Clone)]
pub enum Provider {
    /// One of the deterministic stubs.
    Stub(StubProvider),
    /// SearXNG JSON API.
    Searxng(SearxngProvider),
    /// Brave web search API.
    Brave(BraveProvider),
}

impl Provider {
    /// Build the adapter for `kind` using the settings in `config`.
    ///
    /// Never fails: a provider whose settings are missing still resolves and
    /// reports the gap as a sentinel result when searched.
    pub fn resolve(kind: ProviderKind, config: &SearchConfig) -> Self {
        match kind {
            ProviderKind::FakeA => Self::Stub(StubProvider::a()),
            ProviderKind::FakeB => Self::Stub(StubProvider::b()),
            ProviderKind::Searxng => Self::Searxng(SearxngProvider::new(config)),
            ProviderKind::Brave => Self::Brave(BraveProvider::new(config)),
        }
    }

    /// Resolve a user-supplied identifier (aliases accepted).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownProvider`] before any I/O if the
    /// identifier is outside the catalogue.
    pub fn from_identifier(identifier: &str, config: &SearchConfig) -> Result<Self, SearchError> {
        let kind: ProviderKind = identifier.parse()?;
        Ok(Self::resolve(kind, config))
    }
}

impl SearchProvider for Provider {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>, SearchError> {
        match self {
            Self::Stub(p) => p.search(query, count).await,
            Self::Searxng(p) => p.search(query, count).await,
            Self::Brave(p) => p.search(query, count).await,
        }
    }

    fn kind(&self) -> ProviderKind {
        match self {
            Self::Stub(p) => p.kind(),
            Self::Searxng(p) => p.kind(),
            Self::Brave(p) => p.kind(),
        }
    }
}
