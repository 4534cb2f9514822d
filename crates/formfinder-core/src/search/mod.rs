//! Similarity search over the document store

mod rank;

pub use rank::{dot_product, rank};

use crate::corpus::DocumentRecord;
use serde::Serialize;

/// One ranked record.
///
/// `similarity` is the raw dot product between the query vector and the
/// record's vector.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// Position of the record in the store
    #[serde(skip)]
    pub index: usize,
    #[serde(flatten)]
    pub record: DocumentRecord,
    pub similarity: f64,
}

impl QueryResult {
    pub fn filename(&self) -> &str {
        &self.record.filename
    }

    pub fn content(&self) -> &str {
        &self.record.content
    }

    pub fn form_number(&self) -> &str {
        self.record.form_number()
    }
}
