//! Centroid-based extractive summarizer.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::Embedding;
use crate::sentences::SENTENCE_TERMINATOR;
use crate::traits::{EmbeddingProvider, Summarizer};

/// Picks the sentences closest to the document's mean embedding.
///
/// Every sentence is embedded individually, ranked by cosine similarity to
/// the centroid, and the winners are returned in document order.
pub struct CentroidSummarizer {
    provider: Arc<dyn EmbeddingProvider>,
}

impl CentroidSummarizer {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Summarizer for CentroidSummarizer {
    async fn summarize(&self, text: &str, count: usize) -> Result<Vec<String>> {
        let sentences: Vec<String> = text
            .split(SENTENCE_TERMINATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if sentences.len() <= count {
            return Ok(sentences);
        }

        let mut embeddings = Vec::with_capacity(sentences.len());
        for sentence in &sentences {
            embeddings.push(self.provider.embed(sentence).await?);
        }
        let centroid = Embedding::mean(&embeddings)
            .ok_or_else(|| anyhow::anyhow!("embedding dimensions disagree across sentences"))?;

        let mut ranked: Vec<(usize, f64)> = embeddings
            .iter()
            .enumerate()
            .map(|(i, e)| {
                (
                    i,
                    e.cosine_similarity(&centroid).unwrap_or(f64::NEG_INFINITY),
                )
            })
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut keep: Vec<usize> = ranked.into_iter().take(count).map(|(i, _)| i).collect();
        keep.sort_unstable();

        Ok(keep.into_iter().map(|i| sentences[i].clone()).collect())
    }
}
