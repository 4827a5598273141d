//! Per-run state: the verified-URL set and the run lifecycle.
//!
//! A [`RunContext`] is created for one end-to-end answer and passed by
//! reference through search, compose, and sanitise. It is never global, so
//! unrelated runs cannot see each other's citations. The verified set is
//! filled only by the executor, as a side effect of normalisation.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::citation::{enforce_citations, sanitize};
use crate::error::SearchError;
use crate::types::{ProviderKind, SearchResult};

/// Where a run is in its lifecycle.
///
/// `Fresh → Searching → Composing → Sanitizing → CitationEnforced → Done`.
/// Searches requested by the composer while it is composing leave the phase
/// at `Composing`. The last three phases happen inside
/// [`RunContext::finalize`], which consumes the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Nothing has happened yet.
    Fresh,
    /// One or more searches have run.
    Searching,
    /// The external composer is producing the answer.
    Composing,
    /// Tool-call residue is being stripped.
    Sanitizing,
    /// The Sources block has been rebuilt from verified URLs.
    CitationEnforced,
    /// Terminal. The context has been consumed.
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fresh => "fresh",
            Self::Searching => "searching",
            Self::Composing => "composing",
            Self::Sanitizing => "sanitizing",
            Self::CitationEnforced => "citation_enforced",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// The answer produced at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalAnswer {
    /// Sanitised, citation-enforced answer text.
    pub text: String,
    /// The URLs listed in the Sources block, in listed order.
    pub sources: Vec<String>,
    /// Always [`RunPhase::Done`].
    pub phase: RunPhase,
}

/// State for one end-to-end answer.
#[derive(Debug)]
pub struct RunContext {
    provider: ProviderKind,
    count: usize,
    max_citations: usize,
    verified: Mutex<BTreeSet<String>>,
    phase: Mutex<RunPhase>,
}

impl RunContext {
    /// Start a run against `provider`, requesting `count` results per query.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `count` or `max_citations` is zero.
    pub fn new(provider: ProviderKind, count: usize, max_citations: usize) -> Result<Self, SearchError> {
        if count == 0 {
            return Err(SearchError::Config("count must be greater than 0".into()));
        }
        if max_citations == 0 {
            return Err(SearchError::Config(
                "max_citations must be greater than 0".into(),
            ));
        }
        Ok(Self {
            provider,
            count,
            max_citations,
            verified: Mutex::new(BTreeSet::new()),
            phase: Mutex::new(RunPhase::Fresh),
        })
    }

    /// The provider selected for this run.
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Results requested per query. Backends may clamp further.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Add every non-empty URL in `results` to the verified set.
    ///
    /// Idempotent; safe to call from concurrently completing queries.
    pub fn record_urls(&self, results: &[SearchResult]) {
        let mut verified = lock(&self.verified);
        for result in results {
            let url = result.url.trim();
            if !url.is_empty() {
                verified.insert(url.to_owned());
            }
        }
        tracing::trace!(verified = verified.len(), "verified URLs recorded");
    }

    /// Clear the verified set and return to [`RunPhase::Fresh`].
    pub fn reset(&self) {
        lock(&self.verified).clear();
        *lock(&self.phase) = RunPhase::Fresh;
    }

    /// Verified URLs, sorted lexicographically.
    pub fn verified_urls(&self) -> Vec<String> {
        lock(&self.verified).iter().cloned().collect()
    }

    /// Returns `true` if `url` was returned by a search in this run.
    pub fn is_verified(&self, url: &str) -> bool {
        lock(&self.verified).contains(url.trim())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RunPhase {
        *lock(&self.phase)
    }

    /// Note that a search ran. Composer-initiated searches keep `Composing`.
    pub(crate) fn mark_searching(&self) {
        let mut phase = lock(&self.phase);
        if *phase == RunPhase::Fresh {
            *phase = RunPhase::Searching;
        }
    }

    /// Hand the run over to the answer composer.
    pub fn begin_composing(&self) {
        *lock(&self.phase) = RunPhase::Composing;
    }

    /// Sanitise the composer's text and stamp it with verified sources.
    ///
    /// Consumes the context: this is the only way to finish a run, so no
    /// answer leaves without citation enforcement.
    pub fn finalize(self, raw_answer: &str) -> FinalAnswer {
        self.set_phase(RunPhase::Sanitizing);
        let sanitized = sanitize(raw_answer);

        let verified = self.verified_urls();
        let text = enforce_citations(&sanitized, &verified, self.max_citations);
        self.set_phase(RunPhase::CitationEnforced);

        let sources: Vec<String> = verified.into_iter().take(self.max_citations).collect();
        tracing::info!(
            provider = %self.provider,
            citations = sources.len(),
            "run finalized"
        );

        FinalAnswer {
            text,
            sources,
            phase: RunPhase::Done,
        }
    }

    fn set_phase(&self, next: RunPhase) {
        let mut phase = lock(&self.phase);
        tracing::trace!(from = %*phase, to = %next, "run phase");
        *phase = next;
    }
}

/// A poisoned lock only means another branch panicked mid-insert; the set is
/// still a valid set of strings.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
