//! Deterministic stub providers.
//!
//! Pure functions of `(query, count)`: no I/O, no failure mode. Useful as a
//! default backend and as a fixture for everything downstream.

use crate::error::SearchError;
use crate::provider::SearchProvider;
use crate::types::{ProviderKind, SearchResult};

/// Numbered fake results, tagged with the stub's prefix.
#[derive(Debug, Clone, Copy)]
pub struct StubProvider {
    kind: ProviderKind,
}

impl StubProvider {
    /// Stub A, the default provider.
    pub fn a() -> Self {
        Self {
            kind: ProviderKind::FakeA,
        }
    }

    /// Stub B, formatted differently so the active provider is visible.
    pub fn b() -> Self {
        Self {
            kind: ProviderKind::FakeB,
        }
    }

    /// Produce `count` results for `query`, numbered from 1.
    pub fn results(&self, query: &str, count: usize) -> Vec<SearchResult> {
        (1..=count)
            .map(|i| {
                SearchResult::new(
                    self.kind,
                    format!("[{}] Result {i} for '{query}'", self.kind.tag()),
                    "",
                    "",
                )
            })
            .collect()
    }
}

impl SearchProvider for StubProvider {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, count, provider = %self.kind, "stub search");
        Ok(self.results(query, count))
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }
}
