//! FormFinder Core Library
//!
//! Answers natural-language questions about IRS tax forms by ranking a small
//! in-memory corpus against the query embedding and composing an answer from
//! the top results.
//!
//! # Features
//! - Whole-form ("simple") and PDF-chunk ("enhanced") corpora
//! - Linear-scan dot-product ranking with deterministic tie-breaks
//! - Keyword-intent answer templates with related-section grouping
//! - Generative answers through an OpenAI-compatible chat endpoint
//! - Readiness gate for serving while the corpus loads

pub mod answer;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod llm;
pub mod mode;
pub mod search;
pub mod service;
pub mod store;

pub use answer::{
    listing_answer, AnswerComposer, GenerativeComposer, Intent, TemplateComposer,
    NO_DOCUMENTS_MESSAGE, NO_FORMS_MESSAGE,
};
pub use config::{
    AnswerStrategy, Config, CorpusConfig, EmbeddingConfig, EmbeddingProvider, LLMServiceConfig,
};
pub use corpus::{DocumentRecord, FormInfo, FormMetadata, KindLabel, RecordKind};
pub use engine::{
    composer_for, embedder_from_config, generator_from_config, FormDetails, FormFinder,
    FormSummary, FormsListing, QueryResponse, StatusReport,
};
pub use error::{exit_codes, Error, FormFinderError, LoadError, Result};
pub use llm::{
    ChatMessage, Embedder, Generator, HashedEmbedder, HttpEmbedder, HttpGenerator, LLMClient,
    VLLMClient,
};
pub use mode::{select_mode, Mode, ModeSelection, SwitchReport};
pub use search::{dot_product, rank, QueryResult};
pub use service::Service;
pub use store::DocumentStore;

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "formfinder";
