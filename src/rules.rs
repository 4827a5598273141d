//! Keyword rules that decide how a question is handled.

/// Fixed reply for questions mentioning Python.
pub const PYTHON_ANSWER: &str = "Python is a programming language that is easy to learn.";

/// Fixed reply for questions about artificial intelligence.
pub const AI_ANSWER: &str =
    "AI means artificial intelligence: machines that can perform tasks that require intelligence.";

/// What to do with a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Reply with fixed text.
    Reply(&'static str),
    /// Run a web search with the question as the query.
    Search,
    /// No rule matched; use the configured default answer.
    Fallback,
}

/// Classify `question`. Rules are checked in order: python, AI, search.
pub fn classify(question: &str) -> Intent {
    let q = question.to_lowercase();
    if q.contains("python") {
        Intent::Reply(PYTHON_ANSWER)
    } else if mentions_ai(&q) {
        Intent::Reply(AI_ANSWER)
    } else if q.contains("search") {
        Intent::Search
    } else {
        Intent::Fallback
    }
}

// "ai" only as a whole word, so "said" or "rain" do not match.
fn mentions_ai(q: &str) -> bool {
    q.contains("artificial")
        || q
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word == "ai")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_wins_over_search() {
        assert_eq!(classify("search python docs"), Intent::Reply(PYTHON_ANSWER));
    }

    #[test]
    fn ai_whole_word() {
        assert_eq!(classify("what is AI?"), Intent::Reply(AI_ANSWER));
        assert_eq!(classify("Artificial life"), Intent::Reply(AI_ANSWER));
        assert_eq!(classify("he said it would rain"), Intent::Fallback);
    }

    #[test]
    fn ai_before_search() {
        assert_eq!(classify("search ai news"), Intent::Reply(AI_ANSWER));
    }

    #[test]
    fn search_keyword() {
        assert_eq!(classify("Search cars"), Intent::Search);
        assert_eq!(classify("research topics"), Intent::Search);
    }

    #[test]
    fn fallback_otherwise() {
        assert_eq!(classify("hello"), Intent::Fallback);
        assert_eq!(classify(""), Intent::Fallback);
    }
}
