//! Text and JSON rendering of [`AgentOutput`].

use heron_search::{BatchResults, SearchResult};
use serde::Serialize;

use crate::agent::AgentOutput;

/// Render for a terminal.
pub fn to_text(output: &AgentOutput) -> String {
    match output {
        AgentOutput::Reply(text) => text.clone(),
        AgentOutput::Answer { text, .. } => text.clone(),
        AgentOutput::Search { items, .. } => items_text(items),
        AgentOutput::Multi { results, .. } => results
            .iter()
            .map(|(query, items)| format!("== {query} ==\n{}", items_text(items)))
            .collect::<Vec<_>>()
            .join("\n\n"),
        AgentOutput::Error(message) => format!("error: {message}"),
    }
}

fn items_text(items: &[SearchResult]) -> String {
    if items.is_empty() {
        return "No results found.".to_owned();
    }
    items
        .iter()
        .map(|item| {
            let mut block = item.title.clone();
            if !item.url.is_empty() {
                block.push_str("\n  ");
                block.push_str(&item.url);
            }
            if !item.snippet.is_empty() {
                block.push_str("\n  ");
                block.push_str(&item.snippet);
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct Envelope<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sources: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<&'a [SearchResult]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<&'a BatchResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> Envelope<'a> {
    fn ok(mode: &'static str) -> Self {
        Self {
            ok: true,
            mode: Some(mode),
            answer: None,
            sources: None,
            items: None,
            results: None,
            error: None,
        }
    }
}

/// Render as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(output: &AgentOutput) -> serde_json::Result<String> {
    let envelope = match output {
        AgentOutput::Reply(text) => Envelope {
            answer: Some(text),
            ..Envelope::ok("non-search")
        },
        AgentOutput::Answer { text, sources } => Envelope {
            answer: Some(text),
            sources: Some(sources),
            ..Envelope::ok("answer")
        },
        AgentOutput::Search { items, .. } => Envelope {
            items: Some(items),
            ..Envelope::ok("search")
        },
        AgentOutput::Multi { results, .. } => Envelope {
            results: Some(results),
            ..Envelope::ok("multi")
        },
        AgentOutput::Error(message) => Envelope {
            ok: false,
            mode: None,
            error: Some(message),
            ..Envelope::ok("error")
        },
    };
    serde_json::to_string_pretty(&envelope)
}
