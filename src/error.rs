//! Error types for the heron agent host.

use heron_search::SearchError;

/// Top-level error type for the agent host.
#[derive(Debug, thiserror::Error)]
pub enum HeronError {
    /// Configuration error (bad file, bad environment value).
    #[error("config error: {0}")]
    Config(String),

    /// Search orchestration error.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The answer composer (language model call) failed.
    #[error("composer error: {0}")]
    Composer(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, HeronError>;
