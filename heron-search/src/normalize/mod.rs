//! Result normaliser: URL canonicalisation, snippet truncation, dedup.
//!
//! Every provider response passes through [`normalize_results`] before it
//! leaves the executor. The transforms are independent and composable; each
//! builds new [`SearchResult`] values rather than editing in place.

pub mod dedup;
pub mod snippet;
pub mod url_normalize;

use crate::config::SearchConfig;
use crate::types::SearchResult;

use dedup::dedupe;
use snippet::truncate_snippet;
use url_normalize::canonicalize_url;

/// Canonicalise URLs, truncate snippets, and drop duplicate locations.
pub fn normalize_results(results: Vec<SearchResult>, config: &SearchConfig) -> Vec<SearchResult> {
    let normalized = results
        .iter()
        .map(|r| normalize_result(r, config.snippet_max_chars))
        .collect();
    dedupe(normalized)
}

/// Apply URL canonicalisation and snippet truncation to one result.
pub fn normalize_result(result: &SearchResult, snippet_max_chars: usize) -> SearchResult {
    let url = if result.url.is_empty() {
        String::new()
    } else {
        canonicalize_url(&result.url)
    };
    result
        .with_url(url)
        .with_snippet(truncate_snippet(&result.snippet, snippet_max_chars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProviderKind, SearchFailure};

    #[test]
    fn pipeline_canonicalizes_truncates_and_dedupes() {
        let config = SearchConfig {
            snippet_max_chars: 8,
            ..Default::default()
        };
        let results = vec![
            SearchResult::new(
                ProviderKind::Brave,
                "One",
                "https://example.com/a?utm_source=x",
                "a long snippet here",
            ),
            SearchResult::new(ProviderKind::Brave, "Two", "https://EXAMPLE.com/a", "short"),
            SearchResult::new(ProviderKind::Brave, "Three", "https://example.com/b", " ok "),
        ];

        let out = normalize_results(results, &config);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "One");
        assert_eq!(out[0].url, "https://example.com/a");
        assert_eq!(out[0].snippet, "a long …");
        assert_eq!(out[1].url, "https://example.com/b");
        assert_eq!(out[1].snippet, "ok");
    }

    #[test]
    fn original_results_are_not_mutated() {
        let original = SearchResult::new(ProviderKind::Brave, "T", "https://x.com/?gclid=1", "  s  ");
        let normalized = normalize_result(&original, 400);
        assert_eq!(original.url, "https://x.com/?gclid=1");
        assert_eq!(original.snippet, "  s  ");
        assert_eq!(normalized.url, "https://x.com/");
        assert_eq!(normalized.snippet, "s");
    }

    #[test]
    fn sentinels_and_stubs_pass_through() {
        let results = vec![
            SearchResult::new(ProviderKind::FakeA, "[FAKE-A] Result 1 for 'q'", "", ""),
            SearchResult::new(ProviderKind::FakeA, "[FAKE-A] Result 2 for 'q'", "", ""),
        ];
        assert_eq!(normalize_results(results.clone(), &SearchConfig::default()), results);

        let sentinel = vec![SearchResult::sentinel(
            ProviderKind::Searxng,
            SearchFailure::Transport,
            "search failed: request timed out",
        )];
        assert_eq!(
            normalize_results(sentinel.clone(), &SearchConfig::default()),
            sentinel
        );
    }
}
