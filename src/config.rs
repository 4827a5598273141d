//! Configuration for the agent host.
//!
//! Values come from, lowest to highest precedence: built-in defaults, an
//! optional TOML file, then environment variables (a `.env` file is loaded
//! into the environment by the binary before this runs).

use std::path::Path;

use heron_search::SearchConfig;
use heron_search::config::DEFAULT_BRAVE_ENDPOINT;
use serde::{Deserialize, Serialize};

use crate::error::{HeronError, Result};

/// Answer given when no rule matches.
pub const DEFAULT_ANSWER: &str = "Sorry, I don't know yet.";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeronConfig {
    /// Search provider settings.
    pub search: SearchSettings,
    /// Language model settings for the answer composer.
    pub llm: LlmConfig,
    /// Reply used when no keyword rule matches.
    pub default_answer: String,
}

impl Default for HeronConfig {
    fn default() -> Self {
        Self {
            search: SearchSettings::default(),
            llm: LlmConfig::default(),
            default_answer: DEFAULT_ANSWER.to_owned(),
        }
    }
}

/// Search settings as they appear in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Base URL of a SearXNG instance.
    pub searxng_base_url: Option<String>,
    /// Brave Search subscription token.
    pub brave_api_key: Option<String>,
    /// Brave web search endpoint.
    pub brave_endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum snippet length in characters.
    pub snippet_max_chars: usize,
    /// Maximum number of sources listed under an answer.
    pub max_citations: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let defaults = SearchConfig::default();
        Self {
            searxng_base_url: None,
            brave_api_key: None,
            brave_endpoint: DEFAULT_BRAVE_ENDPOINT.to_owned(),
            timeout_seconds: defaults.timeout_seconds,
            snippet_max_chars: defaults.snippet_max_chars,
            max_citations: defaults.max_citations,
        }
    }
}

impl SearchSettings {
    /// Build the search crate's configuration.
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            searxng_base_url: self.searxng_base_url.clone(),
            brave_api_key: self.brave_api_key.clone(),
            brave_endpoint: self.brave_endpoint.clone(),
            timeout_seconds: self.timeout_seconds,
            snippet_max_chars: self.snippet_max_chars,
            max_citations: self.max_citations,
            ..SearchConfig::default()
        }
    }
}

/// OpenAI-compatible chat endpoint settings (OpenAI, Ollama, OpenRouter).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL including the API version, e.g. `http://localhost:11434/v1`.
    pub base_url: String,
    /// Bearer token. Local servers usually ignore it.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Tool-call rounds allowed before the model must answer.
    pub max_tool_rounds: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_owned(),
            api_key: "ollama".to_owned(),
            model: "qwen2.5:7b-instruct-q4_K_M".to_owned(),
            timeout_seconds: 60,
            max_tool_rounds: 4,
        }
    }
}

impl HeronConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| HeronError::Config(e.to_string()))
    }

    /// Defaults (or `path`, if given) overlaid with the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or a value is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = base.with_lookup(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from `lookup` (usually the environment).
    ///
    /// Blank values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`HeronError::Config`] if a numeric value does not parse.
    pub fn with_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get("SEARXNG_BASE_URL") {
            self.search.searxng_base_url = Some(v);
        }
        if let Some(v) = get("BRAVE_API_KEY") {
            self.search.brave_api_key = Some(v);
        }
        if let Some(v) = get("HERON_SEARCH_TIMEOUT_SECS") {
            self.search.timeout_seconds = v.parse().map_err(|_| {
                HeronError::Config(format!("HERON_SEARCH_TIMEOUT_SECS must be a number, got '{v}'"))
            })?;
        }
        if let Some(v) = get("DEFAULT_ANSWER") {
            self.default_answer = v;
        }
        if let Some(v) = get("LLM_CHOICE") {
            self.llm.model = v;
        }
        if let Some(v) = get("LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Some(v) = get("LLM_API_KEY") {
            self.llm.api_key = v;
        }
        Ok(self)
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the search settings are invalid or
    /// `llm.max_tool_rounds` / `llm.timeout_seconds` is zero.
    pub fn validate(&self) -> Result<()> {
        self.search.to_search_config().validate()?;
        if self.llm.max_tool_rounds == 0 {
            return Err(HeronError::Config(
                "llm.max_tool_rounds must be greater than 0".into(),
            ));
        }
        if self.llm.timeout_seconds == 0 {
            return Err(HeronError::Config(
                "llm.timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_sensible() {
        let config = HeronConfig::default();
        assert_eq!(config.default_answer, DEFAULT_ANSWER);
        assert_eq!(config.search.timeout_seconds, 20);
        assert_eq!(config.search.snippet_max_chars, 400);
        assert_eq!(config.search.max_citations, 5);
        assert!(config.search.searxng_base_url.is_none());
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm.api_key, "ollama");
        assert_eq!(config.llm.max_tool_rounds, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = HeronConfig::default()
            .with_lookup(lookup_from(&[
                ("SEARXNG_BASE_URL", "http://localhost:8888"),
                ("BRAVE_API_KEY", "key"),
                ("HERON_SEARCH_TIMEOUT_SECS", "7"),
                ("DEFAULT_ANSWER", "No idea."),
                ("LLM_CHOICE", "llama3"),
                ("LLM_BASE_URL", "http://localhost:11434/v1"),
                ("LLM_API_KEY", "secret"),
            ]))
            .expect("valid environment");

        assert_eq!(config.search.searxng_base_url.as_deref(), Some("http://localhost:8888"));
        assert_eq!(config.search.brave_api_key.as_deref(), Some("key"));
        assert_eq!(config.search.timeout_seconds, 7);
        assert_eq!(config.default_answer, "No idea.");
        assert_eq!(config.llm.model, "llama3");
        assert_eq!(config.llm.base_url, "http://localhost:11434/v1");
        assert_eq!(config.llm.api_key, "secret");
    }

    #[test]
    fn blank_environment_values_ignored() {
        let config = HeronConfig::default()
            .with_lookup(lookup_from(&[("SEARXNG_BASE_URL", "   "), ("DEFAULT_ANSWER", "")]))
            .expect("valid environment");
        assert!(config.search.searxng_base_url.is_none());
        assert_eq!(config.default_answer, DEFAULT_ANSWER);
    }

    #[test]
    fn bad_timeout_rejected() {
        let err = HeronConfig::default()
            .with_lookup(lookup_from(&[("HERON_SEARCH_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("HERON_SEARCH_TIMEOUT_SECS"));
    }

    #[test]
    fn zero_tool_rounds_invalid() {
        let mut config = HeronConfig::default();
        config.llm.max_tool_rounds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_search_timeout_invalid() {
        let mut config = HeronConfig::default();
        config.search.timeout_seconds = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn to_search_config_carries_settings() {
        let mut settings = SearchSettings::default();
        settings.searxng_base_url = Some("http://sx".into());
        settings.max_citations = 2;
        let search = settings.to_search_config();
        assert_eq!(search.searxng_base_url.as_deref(), Some("http://sx"));
        assert_eq!(search.max_citations, 2);
        assert_eq!(search.brave_endpoint, DEFAULT_BRAVE_ENDPOINT);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: HeronConfig = toml::from_str(
            r#"
            default_answer = "Ask me later."

            [search]
            searxng_base_url = "http://localhost:8080"
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.default_answer, "Ask me later.");
        assert_eq!(config.search.searxng_base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.search.timeout_seconds, 20);
        assert_eq!(config.llm.max_tool_rounds, 4);
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = HeronConfig::from_file(Path::new("/nonexistent/path/heron.toml"));
        assert!(result.is_err());
    }
}
