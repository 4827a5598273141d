//! # heron-search
//!
//! Citation-safe web search orchestration for Heron.
//!
//! This crate owns the search side of answering a question: a uniform
//! provider contract over several backends, normalisation of every result,
//! single and concurrent batch execution, and a guard that keeps the final
//! answer from citing anything that was not actually retrieved.
//!
//! ## Design
//!
//! - Closed provider catalogue ([`ProviderKind`]) resolved once into a
//!   concrete [`Provider`]: two deterministic stubs, SearXNG, Brave
//! - Provider failures are data: a single sentinel [`SearchResult`] with a
//!   [`SearchFailure`] tag instead of an error
//! - Every result is canonicalised (tracking parameters stripped), has its
//!   snippet truncated, and is deduplicated by `(host, path)`
//! - Batches fan out with one request per query and join on all of them
//! - A per-run [`RunContext`] records every URL that crossed the boundary;
//!   [`RunContext::finalize`] rebuilds the answer's Sources from it
//!
//! ## Security
//!
//! - Search queries are logged only at trace level
//! - API keys are never included in results or error messages
//!
//! # Examples
//!
//! ```no_run
//! use heron_search::{execute_one, Provider, ProviderKind, RunContext, SearchConfig};
//!
//! # async fn example() -> heron_search::Result<()> {
//! let config = SearchConfig::default();
//! let provider = Provider::resolve(ProviderKind::FakeA, &config);
//! let ctx = RunContext::new(ProviderKind::FakeA, 3, config.max_citations)?;
//! let results = execute_one(&provider, "search cars", &ctx, &config).await?;
//! for r in &results {
//!     println!("{}", r.title);
//! }
//! let answer = ctx.finalize("Cars are vehicles.");
//! println!("{}", answer.text);
//! # Ok(())
//! # }
//! ```

pub mod citation;
pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod normalize;
pub mod provider;
pub mod providers;
pub mod run;
pub mod types;

pub use citation::{enforce_citations, sanitize};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use executor::{execute_batch, execute_one, BatchResults, QueryBatch};
pub use provider::{Provider, SearchProvider};
pub use run::{FinalAnswer, RunContext, RunPhase};
pub use types::{ProviderKind, SearchFailure, SearchResult};
