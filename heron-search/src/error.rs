//! Error types for the heron-search crate.
//!
//! Ordinary provider failures never surface here: adapters fold them into
//! sentinel results (see [`crate::types::SearchFailure`]). These errors are
//! for problems the pipeline cannot express as data: bad configuration
//! or an invalid request.

/// Errors that can occur during search orchestration.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid search configuration or request parameters.
    #[error("config error: {0}")]
    Config(String),

    /// A provider identifier that does not name any known backend.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// An HTTP request to a search backend failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A backend response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// One query of a fanned-out batch failed, failing the whole batch.
    #[error("batch failed: {0}")]
    Batch(String),
}

/// Convenience type alias for heron-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = SearchError::Config("count must be greater than 0".into());
        assert_eq!(err.to_string(), "config error: count must be greater than 0");
    }

    #[test]
    fn display_unknown_provider() {
        let err = SearchError::UnknownProvider("bing".into());
        assert_eq!(err.to_string(), "unknown provider: bing");
    }

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("missing results array".into());
        assert_eq!(err.to_string(), "parse error: missing results array");
    }

    #[test]
    fn display_batch() {
        let err = SearchError::Batch("query 'rust': config error: bad".into());
        assert_eq!(err.to_string(), "batch failed: query 'rust': config error: bad");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
