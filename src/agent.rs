//! Agent entry points: one question, a batch of queries, or a composed answer.
//!
//! Every entry point returns an [`AgentOutput`] rather than an error so the
//! caller can always render something; failures become
//! [`AgentOutput::Error`].

use heron_search::{
    execute_batch, execute_one, BatchResults, Provider, ProviderKind, SearchProvider, QueryBatch, RunContext,
    SearchFailure, SearchResult,
};

use crate::composer::{compose_answer, AnswerComposer};
use crate::config::HeronConfig;
use crate::rules::{self, Intent};

/// Per-invocation options.
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Provider identifier, e.g. `fakeA` or `searxng`.
    pub provider: String,
    /// Results requested per query.
    pub count: usize,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            provider: ProviderKind::FakeA.name().to_owned(),
            count: 3,
        }
    }
}

/// What the agent produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutput {
    /// A fixed reply from the keyword rules.
    Reply(String),
    /// A composed answer with verified sources.
    Answer {
        /// Finalized answer text, Sources block included.
        text: String,
        /// The URLs listed under Sources.
        sources: Vec<String>,
    },
    /// Results of a single search.
    Search {
        /// Provider that served the query.
        provider: ProviderKind,
        /// Normalized results.
        items: Vec<SearchResult>,
    },
    /// Results of a batch, in submission order.
    Multi {
        /// Provider that served the queries.
        provider: ProviderKind,
        /// Results keyed by query.
        results: BatchResults,
    },
    /// Nothing could be produced.
    Error(String),
}

impl AgentOutput {
    /// Returns `true` for [`AgentOutput::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    fn from_error(err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        tracing::warn!(error = %message, "agent failed");
        Self::Error(message)
    }

    // A lone missing-config sentinel means the search never ran.
    fn from_items(provider: ProviderKind, items: Vec<SearchResult>) -> Self {
        if let [only] = items.as_slice() {
            if only.failure == Some(SearchFailure::MissingConfig) {
                return Self::Error(only.title.clone());
            }
        }
        Self::Search { provider, items }
    }
}

/// Answer one question using the keyword rules.
///
/// Questions that ask to search are lowercased and sent to the provider.
pub async fn answer(question: &str, options: &AgentOptions, config: &HeronConfig) -> AgentOutput {
    let normalized = question.trim().to_lowercase();
    tracing::debug!(
        provider = %options.provider,
        count = options.count,
        "answering question"
    );
    tracing::trace!(question = %normalized, "normalized question");

    match rules::classify(&normalized) {
        Intent::Reply(text) => AgentOutput::Reply(text.to_owned()),
        Intent::Fallback => AgentOutput::Reply(config.default_answer.clone()),
        Intent::Search => search_one(&normalized, options, config).await,
    }
}

/// Search every query in `batch` concurrently, bypassing the keyword rules.
///
/// A batch of one is answered with a plain [`AgentOutput::Search`].
pub async fn answer_many(
    batch: &QueryBatch,
    options: &AgentOptions,
    config: &HeronConfig,
) -> AgentOutput {
    match batch.queries() {
        [] => AgentOutput::Error("no queries given".into()),
        [query] => search_one(query, options, config).await,
        _ => {
            let search_config = config.search.to_search_config();
            let provider = match Provider::from_identifier(&options.provider, &search_config) {
                Ok(provider) => provider,
                Err(e) => return AgentOutput::from_error(e),
            };
            let kind = provider.kind();
            let ctx = match RunContext::new(kind, options.count, search_config.max_citations) {
                Ok(ctx) => ctx,
                Err(e) => return AgentOutput::from_error(e),
            };
            match execute_batch(&provider, batch, &ctx, &search_config).await {
                Ok(results) => AgentOutput::Multi {
                    provider: kind,
                    results,
                },
                Err(e) => AgentOutput::from_error(e),
            }
        }
    }
}

/// Let `composer` answer `question`, with citations enforced on the result.
pub async fn answer_with_composer(
    question: &str,
    composer: &dyn AnswerComposer,
    options: &AgentOptions,
    config: &HeronConfig,
) -> AgentOutput {
    let search_config = config.search.to_search_config();
    let provider = match Provider::from_identifier(&options.provider, &search_config) {
        Ok(provider) => provider,
        Err(e) => return AgentOutput::from_error(e),
    };
    let ctx = match RunContext::new(provider.kind(), options.count, search_config.max_citations) {
        Ok(ctx) => ctx,
        Err(e) => return AgentOutput::from_error(e),
    };

    match compose_answer(question.trim(), composer, &provider, ctx, &search_config).await {
        Ok(answer) => AgentOutput::Answer {
            text: answer.text,
            sources: answer.sources,
        },
        Err(e) => AgentOutput::from_error(e),
    }
}

async fn search_one(query: &str, options: &AgentOptions, config: &HeronConfig) -> AgentOutput {
    let search_config = config.search.to_search_config();
    let provider = match Provider::from_identifier(&options.provider, &search_config) {
        Ok(provider) => provider,
        Err(e) => return AgentOutput::from_error(e),
    };
    let kind = provider.kind();
    let ctx = match RunContext::new(kind, options.count, search_config.max_citations) {
        Ok(ctx) => ctx,
        Err(e) => return AgentOutput::from_error(e),
    };

    match execute_one(&provider, query, &ctx, &search_config).await {
        Ok(items) => AgentOutput::from_items(kind, items),
        Err(e) => AgentOutput::from_error(e),
    }
}
