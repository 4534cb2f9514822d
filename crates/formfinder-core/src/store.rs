//! In-memory document store
//!
//! Records and their embedding matrix live side by side and are aligned by
//! index. Both are only ever replaced together.

use crate::corpus::DocumentRecord;
use crate::error::{FormFinderError, Result};
use crate::llm::Embedder;
use crate::search::{rank, QueryResult};

/// Ordered records plus one embedding per record.
#[derive(Debug, Default)]
pub struct DocumentStore {
    records: Vec<DocumentRecord>,
    embeddings: Vec<Vec<f32>>,
}

impl DocumentStore {
    /// Embed every record and build the store.
    pub async fn build(records: Vec<DocumentRecord>, embedder: &dyn Embedder) -> Result<Self> {
        let texts: Vec<String> = records.iter().map(|r| r.embedding_text()).collect();
        let embeddings = if texts.is_empty() {
            Vec::new()
        } else {
            embedder
                .embed_batch(&texts)
                .await
                .map_err(|e| FormFinderError::Embedding(e.to_string()))?
        };

        Self::from_parts(records, embeddings)
    }

    /// Pair records with precomputed embeddings.
    pub fn from_parts(records: Vec<DocumentRecord>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if embeddings.len() != records.len() {
            return Err(FormFinderError::Embedding(format!(
                "{} embeddings for {} records",
                embeddings.len(),
                records.len()
            )));
        }

        if let Some(first) = embeddings.first() {
            let dim = first.len();
            if let Some(pos) = embeddings.iter().position(|e| e.len() != dim) {
                return Err(FormFinderError::Embedding(format!(
                    "embedding {} has {} dimensions, expected {}",
                    pos,
                    embeddings[pos].len(),
                    dim
                )));
            }
        }

        Ok(Self {
            records,
            embeddings,
        })
    }

    /// Swap in a new record set, re-embedding all of it. The current
    /// contents stay untouched if embedding fails.
    pub async fn replace_documents(
        &mut self,
        records: Vec<DocumentRecord>,
        embedder: &dyn Embedder,
    ) -> Result<()> {
        *self = Self::build(records, embedder).await?;
        Ok(())
    }

    /// Top `k` records for an already-embedded query.
    pub fn search(&self, query_vec: &[f32], k: usize) -> Vec<QueryResult> {
        rank(query_vec, &self.embeddings, k)
            .into_iter()
            .map(|(index, score)| QueryResult {
                index,
                record: self.records[index].clone(),
                similarity: score as f64,
            })
            .collect()
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Vector size, or 0 for an empty store.
    pub fn dimensions(&self) -> usize {
        self.embeddings.first().map(|e| e.len()).unwrap_or(0)
    }
}
