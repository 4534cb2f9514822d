//! Offline embedder based on hashed word features

use super::Embedder;
use crate::error::Result;
use async_trait::async_trait;

/// Deterministic bag-of-words embedder.
///
/// Each lowercased alphanumeric token is hashed with blake3 into one of
/// `dimensions` buckets with a signed weight; the vector is L2-normalised,
/// so dot products between its outputs are cosine similarities. Texts that
/// share no tokens score zero. Needs no model or network access.
pub struct HashedEmbedder {
    dimensions: usize,
}

impl HashedEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dimensions];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = blake3::hash(token.to_lowercase().as_bytes());
            let bytes = hash.as_bytes();
            let mut idx_bytes = [0u8; 8];
            idx_bytes.copy_from_slice(&bytes[..8]);
            let idx = (u64::from_le_bytes(idx_bytes) % self.dimensions as u64) as usize;
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
            v[idx] += sign;
        }

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

#[async_trait]
impl Embedder for HashedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        "hashed-bow"
    }
}
