//! Query executor: single-query and fanned-out batch execution.
//!
//! Both paths share [`execute_one`], which calls the provider, normalises
//! the response, and records every resulting URL in the run's verified set
//! before handing the results back.

use std::collections::HashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::normalize::normalize_results;
use crate::provider::SearchProvider;
use crate::run::RunContext;
use crate::types::SearchResult;

/// An ordered set of cleaned queries.
///
/// Queries are trimmed; blanks and repeats are dropped; first-seen order is
/// kept for re-associating results. Order does not constrain completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBatch {
    queries: Vec<String>,
}

impl QueryBatch {
    /// Clean and collect `queries`.
    pub fn new<I, S>(queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let queries = queries
            .into_iter()
            .map(|q| q.as_ref().trim().to_owned())
            .filter(|q| !q.is_empty() && seen.insert(q.clone()))
            .collect();
        Self { queries }
    }

    /// Build a batch from a `;`-separated list, e.g. `"python; golang;rust"`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(';'))
    }

    /// Number of distinct queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns `true` if no query survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Queries in submission order.
    pub fn queries(&self) -> &[String] {
        &self.queries
    }
}

/// Results of a batch, keyed by originating query, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResults {
    entries: Vec<(String, Vec<SearchResult>)>,
}

impl BatchResults {
    /// Number of queries in the batch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Results for one query, if it was part of the batch.
    pub fn get(&self, query: &str) -> Option<&[SearchResult]> {
        self.entries
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, results)| results.as_slice())
    }

    /// Iterate `(query, results)` in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SearchResult])> {
        self.entries
            .iter()
            .map(|(q, results)| (q.as_str(), results.as_slice()))
    }

    /// Queries in submission order.
    pub fn queries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(q, _)| q.as_str())
    }
}

impl IntoIterator for BatchResults {
    type Item = (String, Vec<SearchResult>);
    type IntoIter = std::vec::IntoIter<(String, Vec<SearchResult>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Serialises as a JSON object whose keys follow submission order.
impl Serialize for BatchResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (query, results) in &self.entries {
            map.serialize_entry(query, results)?;
        }
        map.end()
    }
}

/// Run one query: search, normalise, record verified URLs.
///
/// Uses the run's requested count. Provider failures arrive as sentinel
/// results and are returned like any other result.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for a blank query or invalid config, and
/// propagates any error the provider could not express as a result.
pub async fn execute_one<P: SearchProvider>(
    provider: &P,
    query: &str,
    ctx: &RunContext,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>, SearchError> {
    config.validate()?;
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::Config("query must not be empty".into()));
    }

    ctx.mark_searching();
    let raw = provider.search(query, ctx.count()).await?;
    let results = normalize_results(raw, config);
    ctx.record_urls(&results);

    tracing::debug!(
        provider = %provider.kind(),
        count = results.len(),
        "query executed"
    );
    Ok(results)
}

/// Run every query of `batch` concurrently and re-associate the results.
///
/// One in-flight request per query, with no cap. Waits for all queries to
/// finish (join, not first-completed). A batch of exactly one query takes
/// the single-query path. The returned mapping iterates in submission order
/// whatever order the queries completed in.
///
/// # Errors
///
/// If any query fails with an unrecovered error the whole batch fails with
/// [`SearchError::Batch`] naming the first failing query; there is no
/// partial success.
pub async fn execute_batch<P: SearchProvider>(
    provider: &P,
    batch: &QueryBatch,
    ctx: &RunContext,
    config: &SearchConfig,
) -> Result<BatchResults, SearchError> {
    config.validate()?;

    match batch.queries() {
        [] => Ok(BatchResults::default()),
        [only] => {
            let results = execute_one(provider, only, ctx, config)
                .await
                .map_err(|e| SearchError::Batch(format!("query '{only}': {e}")))?;
            Ok(BatchResults {
                entries: vec![(only.clone(), results)],
            })
        }
        queries => {
            tracing::info!(queries = queries.len(), provider = %provider.kind(), "fanning out batch");

            let futures = queries.iter().map(|query| async move {
                let outcome = execute_one(provider, query, ctx, config).await;
                (query.clone(), outcome)
            });
            let outcomes = futures::future::join_all(futures).await;

            let mut entries = Vec::with_capacity(outcomes.len());
            for (query, outcome) in outcomes {
                match outcome {
                    Ok(results) => entries.push((query, results)),
                    Err(e) => {
                        tracing::warn!(error = %e, "batch query failed, failing batch");
                        return Err(SearchError::Batch(format!("query '{query}': {e}")));
                    }
                }
            }
            Ok(BatchResults { entries })
        }
    }
}
