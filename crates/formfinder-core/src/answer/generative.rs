//! Model-written answers grounded on retrieved text

use super::{truncate_chars, AnswerComposer, NO_DOCUMENTS_MESSAGE};
use crate::error::{FormFinderError, Result};
use crate::llm::Generator;
use crate::search::QueryResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Characters of each result's content placed in the prompt.
pub const CONTEXT_CHARS: usize = 300;

/// One `File:`/`Content:` block per result, newline separated.
pub fn build_context(results: &[QueryResult]) -> String {
    results
        .iter()
        .map(|r| {
            let (content, _) = truncate_chars(r.content(), CONTEXT_CHARS);
            format!("File: {}\nContent: {}", r.filename(), content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(query: &str, context: &str) -> String {
    format!(
        "Answer the question based on these IRS tax forms:\n\n{}\n\nQuestion: {}\nAnswer:",
        context, query
    )
}

/// Composer that delegates the wording to a generative model.
pub struct GenerativeComposer {
    generator: Arc<dyn Generator>,
}

impl GenerativeComposer {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl AnswerComposer for GenerativeComposer {
    async fn compose(&self, query: &str, results: &[QueryResult]) -> Result<String> {
        if results.is_empty() {
            return Ok(NO_DOCUMENTS_MESSAGE.to_string());
        }

        let prompt = build_prompt(query, &build_context(results));
        let output = self.generator.generate(&prompt).await.map_err(|e| {
            tracing::error!("Generation with {} failed: {}", self.generator.model_name(), e);
            match e {
                FormFinderError::Generation(_) => e,
                other => FormFinderError::Generation(other.to_string()),
            }
        })?;

        let answer = output.trim();
        if answer.is_empty() {
            tracing::error!("{} returned an empty answer", self.generator.model_name());
            return Err(FormFinderError::Generation(
                "model returned an empty answer".to_string(),
            ));
        }

        Ok(answer.to_string())
    }

    fn name(&self) -> &'static str {
        "generative"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::test_support::metadata;
    use std::sync::Mutex;

    /// Records prompts and replies with a fixed string or an error.
    struct ScriptedGenerator {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn replying(reply: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Generator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .clone()
                .ok_or_else(|| FormFinderError::ExternalError("HTTP 500".to_string()))
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn test_prompt_layout() {
        let mut long = metadata(0, "1040", "U.S. Individual Income Tax Return", "d");
        long.record.content = "x".repeat(400);
        let results = vec![long, metadata(1, "W-2", "Wage and Tax Statement", "d")];

        let context = build_context(&results);
        let expected_first = format!(
            "File: Form 1040 - U.S. Individual Income Tax Return\nContent: {}",
            "x".repeat(300)
        );
        assert!(context.starts_with(&format!("{}\nFile: Form W-2", expected_first)));

        let prompt = build_prompt("Which form for wages?", &context);
        assert!(prompt.starts_with("Answer the question based on these IRS tax forms:\n\nFile: "));
        assert!(prompt.ends_with("\n\nQuestion: Which form for wages?\nAnswer:"));
    }

    #[tokio::test]
    async fn test_compose_returns_trimmed_output() {
        let generator = ScriptedGenerator::replying(Some("  Use Form W-2.\n"));
        let composer = GenerativeComposer::new(generator.clone());

        let answer = composer
            .compose("wages", &[metadata(0, "W-2", "Wage and Tax Statement", "d")])
            .await
            .unwrap();
        assert_eq!(answer, "Use Form W-2.");
        assert_eq!(generator.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_results_skip_model() {
        let generator = ScriptedGenerator::replying(Some("unused"));
        let composer = GenerativeComposer::new(generator.clone());

        let answer = composer.compose("anything", &[]).await.unwrap();
        assert_eq!(answer, NO_DOCUMENTS_MESSAGE);
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failures_surface_as_generation_errors() {
        let results = vec![metadata(0, "W-2", "Wage and Tax Statement", "d")];

        let composer = GenerativeComposer::new(ScriptedGenerator::replying(None));
        let err = composer.compose("wages", &results).await.unwrap_err();
        assert!(matches!(err, FormFinderError::Generation(_)));

        let composer = GenerativeComposer::new(ScriptedGenerator::replying(Some("   ")));
        let err = composer.compose("wages", &results).await.unwrap_err();
        assert!(matches!(err, FormFinderError::Generation(_)));
    }
}
