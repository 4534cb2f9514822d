//! HTTP-based embedder using external LLM service

use super::{Embedder, LLMClient, VLLMClient};
use crate::config::LLMServiceConfig;
use crate::error::{FormFinderError, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Embedder that uses external HTTP service (vLLM, OpenAI, etc.)
pub struct HttpEmbedder {
    client: Arc<dyn LLMClient>,
    batch_size: usize,
    max_concurrent: usize,
}

impl HttpEmbedder {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self {
            client,
            batch_size: 32,
            max_concurrent: 4,
        }
    }

    /// Create from configuration
    pub fn from_config(config: LLMServiceConfig) -> Result<Self> {
        let batch_size = config.batch_size.max(1);
        let max_concurrent = config.max_concurrent.max(1);
        let client = VLLMClient::new(config)?;
        Ok(Self {
            client: Arc::new(client),
            batch_size,
            max_concurrent,
        })
    }

    pub fn with_batching(mut self, batch_size: usize, max_concurrent: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self.max_concurrent = max_concurrent.max(1);
        self
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.client
            .embed_batch(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FormFinderError::Embedding("No embedding returned".to_string()))
    }

    /// Splits the input into `batch_size` requests, runs up to
    /// `max_concurrent` at once, and reassembles them in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let chunks: Vec<Vec<String>> = texts
            .chunks(self.batch_size)
            .map(<[String]>::to_vec)
            .collect();
        let total_chunks = chunks.len();

        tracing::info!(
            "Embedding {} texts in {} batches ({} concurrent)",
            texts.len(),
            total_chunks,
            self.max_concurrent
        );

        let mut results: Vec<_> = stream::iter(chunks)
            .enumerate()
            .map(|(idx, chunk)| async move {
                tracing::debug!("Processing batch {}/{}", idx + 1, total_chunks);
                (idx, self.client.embed_batch(&chunk).await)
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        results.sort_by_key(|(idx, _)| *idx);

        let mut all_embeddings = Vec::with_capacity(texts.len());
        for (_, result) in results {
            all_embeddings.extend(result?);
        }

        Ok(all_embeddings)
    }

    fn dimensions(&self) -> usize {
        self.client.embedding_dimensions()
    }

    fn model_name(&self) -> &str {
        self.client.embedding_model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    /// Echoes each text's length as a one-element vector.
    struct LengthClient;

    #[async_trait]
    impl LLMClient for LengthClient {
        async fn chat_completion(&self, _messages: Vec<ChatMessage>) -> Result<String> {
            Ok(String::new())
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| vec![t.len() as f32]).collect())
        }

        fn embedding_dimensions(&self) -> usize {
            1
        }

        fn model_name(&self) -> &str {
            "length"
        }

        fn embedding_model_name(&self) -> &str {
            "length"
        }
    }

    #[tokio::test]
    async fn test_batches_preserve_input_order() {
        let embedder = HttpEmbedder::new(Arc::new(LengthClient)).with_batching(2, 3);
        let texts: Vec<String> = (1..=7).map(|n| "x".repeat(n)).collect();

        let embeddings = embedder.embed_batch(&texts).await.unwrap();
        let lengths: Vec<f32> = embeddings.iter().map(|e| e[0]).collect();
        assert_eq!(lengths, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[tokio::test]
    async fn test_single_embed() {
        let embedder = HttpEmbedder::new(Arc::new(LengthClient));
        assert_eq!(embedder.embed("abc").await.unwrap(), vec![3.0]);
        assert_eq!(embedder.model_name(), "length");
    }
}
