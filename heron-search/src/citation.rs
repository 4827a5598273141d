//! Citation guard: answer sanitising and Sources enforcement.
//!
//! The answer composer is free text from an outside party. Before it is
//! shown, residual tool-call markup is stripped and whatever Sources section
//! the composer wrote is replaced by one generated from the URLs the run
//! actually retrieved.

use std::sync::LazyLock;

use regex::Regex;

/// `<tool_call>…</tool_call>` (or `<function_call>`) blocks, non-greedy, across lines.
static TOOL_CALL_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?:tool_call|function_call)>.*?</(?:tool_call|function_call)>")
        .expect("tool-call block pattern is valid")
});

/// An opening tool-call tag that was never closed swallows the rest of the text.
static DANGLING_TOOL_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?:tool_call|function_call)>.*$").expect("dangling tag pattern is valid")
});

/// Stray closing tags left behind by partial output.
static STRAY_CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</(?:tool_call|function_call)>").expect("closing tag pattern is valid")
});

/// Echoed tool arguments such as `{"name": "web_search", "arguments": {"query": "x"}}`.
static TOOL_ARGUMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)\{\s*"(?:name|arguments|query|queries|tool|function)"\s*:(?:[^{}]|\{[^{}]*\})*\}"#,
    )
    .expect("tool arguments pattern is valid")
});

/// Start of a composer-written Sources section.
///
/// Either a heading at the start of a line, optionally behind a list marker,
/// markdown heading or emphasis (`- Sources:`, `## Sources`, `**Sources used:**`,
/// `Source:`), or `source:` / `sources:` anywhere in the text.
static SOURCES_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?im)",
        r"^[ \t]*(?:[-*+][ \t]+|\d+[.)][ \t]+)?(?:#{1,6}[ \t]*)?(?:\*\*|__|\*|_)?sources?",
        r"(?:(?:\*\*|__|\*|_)?[ \t]*$|(?:[ \t]+[\w-]+){0,3}(?:\*\*|__|\*|_)?[ \t]*:)",
        r"|\bsources?(?:\*\*|__)?[ \t]*:",
    ))
    .expect("sources heading pattern is valid")
});

/// Strip residual tool-call markup and echoed tool arguments, then trim.
pub fn sanitize(raw_answer: &str) -> String {
    let text = TOOL_CALL_BLOCK.replace_all(raw_answer, "");
    let text = DANGLING_TOOL_CALL.replace_all(&text, "");
    let text = STRAY_CLOSING_TAG.replace_all(&text, "");
    let text = TOOL_ARGUMENTS.replace_all(&text, "");
    text.trim().to_owned()
}

/// Drop the composer's Sources section and append a verified one.
///
/// Everything from the first Sources marker (case-insensitive: a heading
/// line such as `- Sources:` or `## Source`, or an inline `sources:`) to the
/// end of the text is discarded regardless of its contents. A fresh block is then built from `verified_urls`: blanks and
/// duplicates removed, sorted lexicographically, capped at `max_citations`,
/// numbered from 1. With no verified URLs nothing is appended.
pub fn enforce_citations(text: &str, verified_urls: &[String], max_citations: usize) -> String {
    let body = match SOURCES_HEADING.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    };
    let body = body.trim_end();

    let mut urls: Vec<&str> = verified_urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .collect();
    urls.sort_unstable();
    urls.dedup();
    urls.truncate(max_citations);

    if urls.is_empty() {
        return body.to_owned();
    }

    let block = urls
        .iter()
        .enumerate()
        .map(|(i, url)| format!("{}) {url}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    if body.is_empty() {
        format!("Sources:\n{block}")
    } else {
        format!("{body}\n\nSources:\n{block}")
    }
}
