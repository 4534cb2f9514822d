//! HTTP client for external LLM services (vLLM, OpenAI, etc.)

use crate::config::LLMServiceConfig;
use crate::error::{FormFinderError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Trait for LLM service clients
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate chat completion
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String>;

    /// Generate embeddings for multiple texts
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get embedding dimensions (0 until known)
    fn embedding_dimensions(&self) -> usize;

    /// Get chat model name
    fn model_name(&self) -> &str;

    /// Get embedding model name
    fn embedding_model_name(&self) -> &str;
}

/// Chat message for completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// vLLM/OpenAI-compatible client
pub struct VLLMClient {
    http_client: reqwest::Client,
    config: LLMServiceConfig,
    embedding_dimensions: AtomicUsize,
}

impl VLLMClient {
    /// Create new vLLM client from configuration
    pub fn new(config: LLMServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let embedding_dimensions = AtomicUsize::new(config.embedding_dimensions.unwrap_or(0));

        Ok(Self {
            http_client,
            config,
            embedding_dimensions,
        })
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key {
            Some(ref api_key) => req.header("Authorization", format!("Bearer {}", api_key)),
            None => req,
        }
    }
}

#[async_trait]
impl LLMClient for VLLMClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        #[derive(Serialize)]
        struct ChatRequest {
            model: String,
            messages: Vec<ChatMessage>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatMessage,
        }

        let base = self.config.url.as_deref().ok_or_else(|| {
            FormFinderError::Config("llm_service.url is not set".to_string())
        })?;

        let start = Instant::now();
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: 0.3,
            max_tokens: 200,
        };

        let url = format!("{}/v1/chat/completions", base);
        let response = self
            .authorize(self.http_client.post(&url).json(&request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FormFinderError::ExternalError(format!(
                "LLM service error (HTTP {}): {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response.json().await?;
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| FormFinderError::Generation("No response from LLM".to_string()))?;

        tracing::debug!(
            "Chat completion took {} ms",
            start.elapsed().as_millis()
        );
        Ok(content)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        #[derive(Serialize)]
        struct EmbedRequest<'a> {
            model: &'a str,
            input: &'a [String],
        }

        #[derive(Deserialize)]
        struct EmbedResponse {
            data: Vec<EmbedData>,
        }

        #[derive(Deserialize)]
        struct EmbedData {
            embedding: Vec<f32>,
        }

        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let base = self.config.embeddings_url().ok_or_else(|| {
            FormFinderError::Config("llm_service.embedding_url is not set".to_string())
        })?;

        let request = EmbedRequest {
            model: &self.config.embedding_model,
            input: texts,
        };

        let url = format!("{}/v1/embeddings", base);
        let response = self
            .authorize(self.http_client.post(&url).json(&request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FormFinderError::ExternalError(format!(
                "Embedding service error (HTTP {}): {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response.json().await?;
        if embed_response.data.len() != texts.len() {
            return Err(FormFinderError::Embedding(format!(
                "expected {} embeddings, service returned {}",
                texts.len(),
                embed_response.data.len()
            )));
        }

        let embeddings: Vec<Vec<f32>> = embed_response
            .data
            .into_iter()
            .map(|d| d.embedding)
            .collect();

        if let Some(first) = embeddings.first() {
            let _ = self.embedding_dimensions.compare_exchange(
                0,
                first.len(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            );
        }

        Ok(embeddings)
    }

    fn embedding_dimensions(&self) -> usize {
        self.embedding_dimensions.load(Ordering::Relaxed)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn embedding_model_name(&self) -> &str {
        &self.config.embedding_model
    }
}
