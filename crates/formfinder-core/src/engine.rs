//! The question-answering context
//!
//! `FormFinder` owns everything a request needs: the active mode, the loaded
//! store, the embedder used for query vectors and the answer composer. It is
//! built once at startup and then only read.

use crate::answer::{listing_answer, AnswerComposer, GenerativeComposer, TemplateComposer};
use crate::config::{AnswerStrategy, Config, CorpusConfig, EmbeddingProvider};
use crate::corpus::{self, DocumentRecord, FormMetadata, KindLabel, RecordKind};
use crate::error::{FormFinderError, Result};
use crate::llm::{Embedder, Generator, HashedEmbedder, HttpEmbedder, HttpGenerator};
use crate::mode::{select_mode, switch_report, Mode, SwitchReport};
use crate::search::QueryResult;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

const FORM_PREVIEW_CHUNKS: usize = 5;

/// Complete answer to one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub query: String,
    pub answer: String,
    pub results: Vec<QueryResult>,
    pub total_documents: usize,
    pub mode: Mode,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub status: String,
    pub mode: Mode,
    pub total_documents: usize,
    pub total_forms: usize,
    pub total_chunks: usize,
    pub enhanced_available: bool,
    pub composer: String,
    pub embedding_model: String,
    pub dimensions: usize,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSummary {
    pub form_number: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormsListing {
    /// Records in the store, chunks included
    pub total: usize,
    pub unique_forms: usize,
    pub mode: Mode,
    pub forms: Vec<FormSummary>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChunkCounts {
    pub line_items: usize,
    pub sections: usize,
    pub instructions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkSummary {
    pub total: usize,
    pub by_type: ChunkCounts,
    pub preview: Vec<DocumentRecord>,
}

/// Everything the store holds for one form number.
#[derive(Debug, Clone, Serialize)]
pub struct FormDetails {
    pub form_number: String,
    pub total_documents: usize,
    pub has_chunks: bool,
    pub metadata: Option<DocumentRecord>,
    pub chunks: ChunkSummary,
}

impl FormDetails {
    /// Structured metadata fields, when the form has a metadata record.
    pub fn form_metadata(&self) -> Option<&FormMetadata> {
        match self.metadata.as_ref().map(|r| &r.kind) {
            Some(RecordKind::Metadata(meta)) => Some(meta),
            _ => None,
        }
    }
}

/// Loaded, ready-to-query state.
pub struct FormFinder {
    mode: Mode,
    corpus: CorpusConfig,
    store: DocumentStore,
    embedder: Arc<dyn Embedder>,
    composer: Arc<dyn AnswerComposer>,
    loaded_at: DateTime<Utc>,
}

impl FormFinder {
    /// Select the mode, load and embed the corpus. Any failure here means
    /// the process must not serve queries.
    pub async fn start(
        config: &Config,
        embedder: Arc<dyn Embedder>,
        generator: Option<Arc<dyn Generator>>,
    ) -> Result<Self> {
        let selection = select_mode(&config.corpus);
        let source = selection.source.clone();
        let mode = selection.mode;
        let records = tokio::task::spawn_blocking(move || corpus::load(&source, mode))
            .await
            .map_err(|e| anyhow::anyhow!("corpus loader panicked: {}", e))??;
        let composer = composer_for(selection.mode, config.answer.strategy, generator)?;

        let finder = Self::from_records(records, selection.mode, embedder, composer)
            .await?
            .with_corpus(config.corpus.clone());

        tracing::info!(
            "Ready: {} documents in {} mode, {} answers, embeddings from {} ({} dims)",
            finder.store.len(),
            finder.mode,
            finder.composer.name(),
            finder.embedder.model_name(),
            finder.store.dimensions()
        );
        Ok(finder)
    }

    /// Build from records already in memory.
    pub async fn from_records(
        records: Vec<DocumentRecord>,
        mode: Mode,
        embedder: Arc<dyn Embedder>,
        composer: Arc<dyn AnswerComposer>,
    ) -> Result<Self> {
        let store = DocumentStore::build(records, embedder.as_ref()).await?;
        Ok(Self {
            mode,
            corpus: CorpusConfig::default(),
            store,
            embedder,
            composer,
            loaded_at: Utc::now(),
        })
    }

    /// Corpus locations used by `status` and `switch_mode`.
    pub fn with_corpus(mut self, corpus: CorpusConfig) -> Self {
        self.corpus = corpus;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Embed the query, rank the store and compose an answer.
    ///
    /// `top_k` defaults per mode. With `use_generation` off the answer is a
    /// plain listing of the matched filenames.
    pub async fn query(
        &self,
        text: &str,
        use_generation: bool,
        top_k: Option<usize>,
    ) -> Result<QueryResponse> {
        if text.trim().is_empty() {
            return Err(FormFinderError::InvalidInput("query is empty".to_string()));
        }

        let k = top_k.unwrap_or_else(|| self.mode.default_top_k());
        let query_vec = self
            .embedder
            .embed(text)
            .await
            .map_err(|e| FormFinderError::Embedding(e.to_string()))?;
        if !self.store.is_empty() && query_vec.len() != self.store.dimensions() {
            return Err(FormFinderError::Embedding(format!(
                "query vector has {} dimensions, store has {}",
                query_vec.len(),
                self.store.dimensions()
            )));
        }

        let results = self.store.search(&query_vec, k);
        tracing::debug!(
            "Query '{}' matched {} of {} documents (top score {:?})",
            text,
            results.len(),
            self.store.len(),
            results.first().map(|r| r.similarity)
        );

        let answer = if use_generation {
            self.composer.compose(text, &results).await?
        } else {
            listing_answer(self.mode, &results)
        };

        Ok(QueryResponse {
            query: text.to_string(),
            answer,
            results,
            total_documents: self.store.len(),
            mode: self.mode,
        })
    }

    pub fn status(&self) -> StatusReport {
        let records = self.store.records();
        let total_forms = records
            .iter()
            .map(|r| r.form_number())
            .collect::<HashSet<_>>()
            .len();

        StatusReport {
            status: "ready".to_string(),
            mode: self.mode,
            total_documents: records.len(),
            total_forms,
            total_chunks: records.iter().filter(|r| !r.is_metadata()).count(),
            enhanced_available: self.corpus.enhanced_path.exists(),
            composer: self.composer.name().to_string(),
            embedding_model: self.embedder.model_name().to_string(),
            dimensions: self.store.dimensions(),
            loaded_at: self.loaded_at,
        }
    }

    /// One entry per form number, taken from its first record in store order.
    pub fn list_forms(&self) -> FormsListing {
        let mut seen = HashSet::new();
        let mut forms = Vec::new();
        for record in self.store.records() {
            if seen.insert(record.form_number()) {
                forms.push(FormSummary {
                    form_number: record.form_number().to_string(),
                    filename: record.filename.clone(),
                });
            }
        }

        FormsListing {
            total: self.store.len(),
            unique_forms: forms.len(),
            mode: self.mode,
            forms,
        }
    }

    pub fn form_details(&self, form_number: &str) -> Result<FormDetails> {
        let form_number = form_number.trim();
        let docs: Vec<&DocumentRecord> = self
            .store
            .records()
            .iter()
            .filter(|r| r.form_number() == form_number)
            .collect();

        if docs.is_empty() {
            return Err(FormFinderError::FormNotFound(form_number.to_string()));
        }

        let metadata = docs.iter().find(|r| r.is_metadata()).map(|r| (*r).clone());
        let chunks: Vec<&DocumentRecord> = docs.iter().copied().filter(|r| !r.is_metadata()).collect();

        let mut by_type = ChunkCounts::default();
        for chunk in &chunks {
            match chunk.label() {
                KindLabel::LineItem => by_type.line_items += 1,
                KindLabel::SectionHeader => by_type.sections += 1,
                KindLabel::Instruction => by_type.instructions += 1,
                KindLabel::Metadata | KindLabel::Other => {}
            }
        }

        Ok(FormDetails {
            form_number: form_number.to_string(),
            total_documents: docs.len(),
            has_chunks: !chunks.is_empty(),
            metadata,
            chunks: ChunkSummary {
                total: chunks.len(),
                by_type,
                preview: chunks
                    .iter()
                    .take(FORM_PREVIEW_CHUNKS)
                    .map(|r| (*r).clone())
                    .collect(),
            },
        })
    }

    /// Whether a restart could change modes. The live mode never changes.
    pub fn switch_mode(&self) -> SwitchReport {
        switch_report(self.mode, &self.corpus)
    }
}

/// Pick the composer for a mode. Enhanced mode is always templated.
pub fn composer_for(
    mode: Mode,
    strategy: AnswerStrategy,
    generator: Option<Arc<dyn Generator>>,
) -> Result<Arc<dyn AnswerComposer>> {
    if mode == Mode::Enhanced {
        if strategy == AnswerStrategy::Generative {
            tracing::warn!("Generative answers are not used in enhanced mode, using templates");
        }
        return Ok(Arc::new(TemplateComposer::enhanced()));
    }

    match (strategy, generator) {
        (AnswerStrategy::Templated, _) => Ok(Arc::new(TemplateComposer::simple())),
        (AnswerStrategy::Generative | AnswerStrategy::Auto, Some(generator)) => {
            Ok(Arc::new(GenerativeComposer::new(generator)))
        }
        (AnswerStrategy::Generative, None) => Err(FormFinderError::Config(
            "answer.strategy is generative but llm_service.url is not set".to_string(),
        )),
        (AnswerStrategy::Auto, None) => Ok(Arc::new(TemplateComposer::simple())),
    }
}

/// Embedding provider named by the config.
pub fn embedder_from_config(config: &Config) -> Result<Arc<dyn Embedder>> {
    match config.embedding.provider {
        EmbeddingProvider::Http => Ok(Arc::new(HttpEmbedder::from_config(
            config.llm_service.clone(),
        )?)),
        EmbeddingProvider::Hashed => {
            if config.embedding.dimensions == 0 {
                return Err(FormFinderError::Config(
                    "embedding.dimensions must be positive".to_string(),
                ));
            }
            Ok(Arc::new(HashedEmbedder::new(config.embedding.dimensions)))
        }
    }
}

/// Generator for the configured chat endpoint, if there is one.
pub fn generator_from_config(config: &Config) -> Result<Option<Arc<dyn Generator>>> {
    if !config.llm_service.has_generator() || config.answer.strategy == AnswerStrategy::Templated {
        return Ok(None);
    }
    let generator = HttpGenerator::from_config(config.llm_service.clone())?;
    Ok(Some(Arc::new(generator)))
}
