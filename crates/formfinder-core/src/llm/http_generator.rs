//! HTTP-based text generator using external LLM service

use super::{ChatMessage, Generator, LLMClient, VLLMClient};
use crate::config::LLMServiceConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Generator that sends the prompt as a single chat message
pub struct HttpGenerator {
    client: Arc<dyn LLMClient>,
}

impl HttpGenerator {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Create from configuration
    pub fn from_config(config: LLMServiceConfig) -> Result<Self> {
        let client = VLLMClient::new(config)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.client
            .chat_completion(vec![ChatMessage::user(prompt)])
            .await
    }

    fn model_name(&self) -> &str {
        self.client.model_name()
    }
}
