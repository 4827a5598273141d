//! Answer composition behind a narrow search seam.
//!
//! A composer (usually a language model) turns a question into prose. It
//! may search as often as it likes through a [`SearchSession`], which routes
//! every call through the executor so each returned URL lands in the run's
//! verified set. Whatever text comes back is finalized by
//! [`compose_answer`]; the composer never decides the Sources list.

pub mod openai;

use async_trait::async_trait;
use heron_search::{
    execute_batch, execute_one, BatchResults, FinalAnswer, Provider, ProviderKind, QueryBatch,
    RunContext, SearchConfig, SearchResult,
};

use crate::error::Result;

pub use openai::OpenAiComposer;

/// Something that can write an answer, optionally after searching.
#[async_trait]
pub trait AnswerComposer: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Produce the raw answer text for `question`.
    async fn compose(&self, question: &str, session: &SearchSession<'_>) -> Result<String>;
}

/// The only search surface a composer sees.
pub struct SearchSession<'a> {
    provider: &'a Provider,
    ctx: &'a RunContext,
    config: &'a SearchConfig,
}

impl<'a> SearchSession<'a> {
    /// Bind a session to one run.
    pub fn new(provider: &'a Provider, ctx: &'a RunContext, config: &'a SearchConfig) -> Self {
        Self {
            provider,
            ctx,
            config,
        }
    }

    /// The provider searches go to.
    pub fn provider(&self) -> ProviderKind {
        self.ctx.provider()
    }

    /// Run one query. Results are normalized and recorded.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank query or invalid search configuration.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let results = execute_one(self.provider, query, self.ctx, self.config).await?;
        Ok(results)
    }

    /// Run several queries concurrently. Results are normalized and recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if any query in the batch fails.
    pub async fn search_many(&self, queries: &[String]) -> Result<BatchResults> {
        let batch = QueryBatch::new(queries);
        let results = execute_batch(self.provider, &batch, self.ctx, self.config).await?;
        Ok(results)
    }
}

/// Run `composer` for `question` and finalize its answer.
///
/// The context is consumed: the returned text has been sanitized and its
/// Sources block rebuilt from URLs this run actually retrieved.
///
/// # Errors
///
/// Returns the composer's error; no partial answer is produced.
pub async fn compose_answer(
    question: &str,
    composer: &dyn AnswerComposer,
    provider: &Provider,
    ctx: RunContext,
    config: &SearchConfig,
) -> Result<FinalAnswer> {
    ctx.begin_composing();
    tracing::debug!(composer = composer.name(), provider = %ctx.provider(), "composing answer");

    let raw = {
        let session = SearchSession::new(provider, &ctx, config);
        composer.compose(question, &session).await?
    };

    Ok(ctx.finalize(&raw))
}
