//! Heron: a small question-answering agent.
//!
//! Questions are routed by keyword rules to a fixed reply, the configured
//! default answer, or a web search. With a language model attached, the
//! model may search on its own and its answer is finalized so that only
//! URLs the run actually retrieved appear under Sources.
//!
//! # Architecture
//!
//! - **Rules**: keyword matcher choosing reply, search or fallback
//! - **Agent**: entry points returning a renderable [`AgentOutput`]
//! - **Composer**: [`AnswerComposer`] seam plus an OpenAI-compatible client
//! - **Search**: provider adapters, normalization, batch execution and the
//!   citation guard live in [`heron_search`]
//! - **Render**: text and JSON output

pub mod agent;
pub mod composer;
pub mod config;
pub mod error;
pub mod render;
pub mod rules;

pub use agent::{AgentOptions, AgentOutput, answer, answer_many, answer_with_composer};
pub use composer::{AnswerComposer, OpenAiComposer, SearchSession, compose_answer};
pub use config::{HeronConfig, LlmConfig, SearchSettings};
pub use error::{HeronError, Result};
