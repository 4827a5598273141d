//! OpenAI-compatible chat composer.
//!
//! Talks to any server exposing `POST {base_url}/chat/completions` (OpenAI,
//! Ollama, OpenRouter, llama.cpp) without streaming. The model gets two
//! tools backed by the [`SearchSession`]:
//!
//! - `web_search(query)`
//! - `web_search_many(queries)`
//!
//! Tool results go back as JSON tool messages. After `max_tool_rounds`
//! rounds a last request is sent without tools so the model has to answer.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{AnswerComposer, SearchSession};
use crate::config::LlmConfig;
use crate::error::{HeronError, Result};

/// System prompt sent with every conversation.
pub const SYSTEM_PROMPT: &str = "\
You are a concise assistant.

You can call `web_search(query)` to search the web, or `web_search_many(queries)` \
to run several searches at once. Each result has a title, url, snippet and provider.

Guidelines:
- If the user asks for current facts, search first and then answer.
- Cite the URLs you relied on at the end of your answer under \"Sources:\".
- Be brief and avoid speculation. If results are thin, say so.";

// ── Wire types ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Default, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

fn function_kind() -> String {
    "function".to_owned()
}

#[derive(Debug, Deserialize)]
struct WebSearchArgs {
    query: String,
}

#[derive(Debug, Deserialize)]
struct WebSearchManyArgs {
    queries: Vec<String>,
}

/// JSON schema of the two search tools.
fn tool_definitions() -> serde_json::Value {
    json!([
        {
            "type": "function",
            "function": {
                "name": "web_search",
                "description": "Search the web. Returns a list of results with title, url, snippet and provider.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "The search query" }
                    },
                    "required": ["query"]
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": "web_search_many",
                "description": "Run several web searches concurrently. Returns results keyed by query.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "queries": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "The search queries"
                        }
                    },
                    "required": ["queries"]
                }
            }
        }
    ])
}

// ── Composer ──────────────────────────────────────────────────

/// Composer backed by an OpenAI-compatible chat endpoint.
pub struct OpenAiComposer {
    config: LlmConfig,
    client: reqwest::Client,
}

impl OpenAiComposer {
    /// Create a composer for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HeronError::Composer`] if the HTTP client cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| HeronError::Composer(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn complete(
        &self,
        messages: &[serde_json::Value],
        with_tools: bool,
    ) -> Result<AssistantMessage> {
        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
            "stream": false,
        });
        if with_tools {
            if let Some(obj) = body.as_object_mut() {
                obj.insert("tools".into(), tool_definitions());
                obj.insert("tool_choice".into(), json!("auto"));
            }
        }

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| HeronError::Composer(format!("chat request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(HeronError::Composer(format!(
                "chat endpoint returned HTTP {}: {}",
                status.as_u16(),
                extract_error_message(&body_text)
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| HeronError::Composer(format!("malformed chat response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| HeronError::Composer("chat response had no choices".into()))
    }

    /// Run one tool call and return the content for the tool message.
    ///
    /// Failures are reported to the model as text rather than aborting.
    async fn run_tool(&self, call: &ToolCall, session: &SearchSession<'_>) -> String {
        tracing::debug!(tool = %call.function.name, "tool call");
        let outcome = match call.function.name.as_str() {
            "web_search" => match serde_json::from_str::<WebSearchArgs>(&call.function.arguments) {
                Ok(args) => match session.search(&args.query).await {
                    Ok(results) => serde_json::to_string(&results).map_err(|e| e.to_string()),
                    Err(e) => Err(e.to_string()),
                },
                Err(e) => Err(format!("invalid arguments: {e}")),
            },
            "web_search_many" => {
                match serde_json::from_str::<WebSearchManyArgs>(&call.function.arguments) {
                    Ok(args) => match session.search_many(&args.queries).await {
                        Ok(results) => serde_json::to_string(&results).map_err(|e| e.to_string()),
                        Err(e) => Err(e.to_string()),
                    },
                    Err(e) => Err(format!("invalid arguments: {e}")),
                }
            }
            other => Err(format!("unknown tool: {other}")),
        };

        match outcome {
            Ok(content) => content,
            Err(message) => {
                tracing::warn!(tool = %call.function.name, error = %message, "tool call failed");
                json!({ "error": message }).to_string()
            }
        }
    }
}

#[async_trait]
impl AnswerComposer for OpenAiComposer {
    fn name(&self) -> &str {
        "openai"
    }

    async fn compose(&self, question: &str, session: &SearchSession<'_>) -> Result<String> {
        let mut messages = vec![
            json!({ "role": "system", "content": SYSTEM_PROMPT }),
            json!({ "role": "user", "content": question }),
        ];

        for round in 0..self.config.max_tool_rounds {
            let reply = self.complete(&messages, true).await?;
            let calls = reply.tool_calls.unwrap_or_default();
            if calls.is_empty() {
                return Ok(reply.content.unwrap_or_default());
            }

            tracing::debug!(round, calls = calls.len(), "model requested tools");
            messages.push(json!({
                "role": "assistant",
                "content": reply.content,
                "tool_calls": calls,
            }));
            for call in &calls {
                let content = self.run_tool(call, session).await;
                messages.push(json!({
                    "role": "tool",
                    "tool_call_id": call.id,
                    "content": content,
                }));
            }
        }

        tracing::debug!(
            rounds = self.config.max_tool_rounds,
            "tool rounds exhausted, requesting final answer"
        );
        let reply = self.complete(&messages, false).await?;
        Ok(reply.content.unwrap_or_default())
    }
}

/// Pull `error.message` out of an error body, or fall back to the raw text.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let mut config = LlmConfig::default();
        config.base_url = "http://localhost:11434/v1/".into();
        let composer = OpenAiComposer::new(config).expect("client");
        assert_eq!(composer.endpoint(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn tool_definitions_name_both_tools() {
        let tools = tool_definitions();
        let names: Vec<&str> = tools
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|t| t["function"]["name"].as_str())
                    .collect()
            })
            .unwrap_or_default();
        assert_eq!(names, vec!["web_search", "web_search_many"]);
    }

    #[test]
    fn tool_call_without_type_defaults_to_function() {
        let call: ToolCall = serde_json::from_str(
            r#"{"id":"c1","function":{"name":"web_search","arguments":"{\"query\":\"x\"}"}}"#,
        )
        .expect("valid tool call");
        assert_eq!(call.kind, "function");
    }

    #[test]
    fn null_tool_calls_accepted() {
        let msg: AssistantMessage =
            serde_json::from_str(r#"{"content":"hi","tool_calls":null}"#).expect("valid message");
        assert!(msg.tool_calls.is_none());
        assert_eq!(msg.content.as_deref(), Some("hi"));
    }

    #[test]
    fn error_message_extracted_from_json() {
        let body = r#"{"error":{"message":"model not found","type":"invalid_request_error"}}"#;
        assert_eq!(extract_error_message(body), "model not found");
        assert_eq!(extract_error_message("  plain text \n"), "plain text");
    }

    #[test]
    fn system_prompt_asks_for_sources() {
        assert!(SYSTEM_PROMPT.contains("Sources:"));
        assert!(SYSTEM_PROMPT.contains("web_search_many"));
    }
}
