//! LLM trait definitions

use crate::error::Result;
use async_trait::async_trait;

/// Embedding generation trait
///
/// Implementations must be deterministic for a fixed model: the same text
/// always maps to the same vector, and every vector has `dimensions()`
/// entries.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embedding for single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for batch of texts, in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Free-text generation trait
#[async_trait]
pub trait Generator: Send + Sync {
    /// Complete a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get model name
    fn model_name(&self) -> &str;
}
