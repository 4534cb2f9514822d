//! LLM integration
//!
//! Provides traits and implementations for:
//! - Embedding generation via external services (vLLM, OpenAI, etc.)
//! - Offline hashed embeddings
//! - Free-text generation for answers

mod client;
mod hashed_embedder;
mod http_embedder;
mod http_generator;
mod traits;

pub use client::{ChatMessage, LLMClient, VLLMClient};
pub use hashed_embedder::HashedEmbedder;
pub use http_embedder::HttpEmbedder;
pub use http_generator::HttpGenerator;
pub use traits::*;
