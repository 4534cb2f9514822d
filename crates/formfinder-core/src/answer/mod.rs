//! Answer composition
//!
//! Turns a ranked result list and the raw query into answer text. Two
//! composers exist: rule-based templates and a generative model prompted
//! with the retrieved text.

mod generative;
mod intent;
mod template;

pub use generative::{build_context, build_prompt, GenerativeComposer, CONTEXT_CHARS};
pub use intent::Intent;
pub use template::{TemplateComposer, HIGH_CONFIDENCE};

use crate::error::Result;
use crate::mode::Mode;
use crate::search::QueryResult;
use async_trait::async_trait;

/// Empty-result answer for the simple composers.
pub const NO_DOCUMENTS_MESSAGE: &str = "I couldn't find any relevant documents for your query.";

/// Empty-result answer for the chunk-aware templated composer.
pub const NO_FORMS_MESSAGE: &str = "I couldn't find any forms matching your question. Could you try rephrasing it or adding more details about what you're trying to accomplish?";

/// Writes an answer from ranked results.
///
/// An empty result list is never an error: composers answer it with a fixed
/// message.
#[async_trait]
pub trait AnswerComposer: Send + Sync {
    async fn compose(&self, query: &str, results: &[QueryResult]) -> Result<String>;

    /// Short name for status output and logs
    fn name(&self) -> &'static str;
}

/// Answer used when generation is turned off for a query.
pub fn listing_answer(mode: Mode, results: &[QueryResult]) -> String {
    let noun = match mode {
        Mode::Simple => "files",
        Mode::Enhanced => "forms",
    };
    let names: Vec<&str> = results.iter().map(|r| r.filename()).collect();
    format!("Found {} relevant {}: {}", results.len(), noun, names.join(", "))
}

/// First `max_chars` characters of `text`, and whether anything was cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}
