//! Mock embedding provider for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tutorbench_core::model::Embedding;
use tutorbench_core::traits::EmbeddingProvider;

/// Dimension of mock vectors.
pub const MOCK_DIM: usize = 16;

/// A mock embedding provider for exercising the scoring pipeline without a
/// model load or network access.
///
/// Deterministic: identical text always folds to an identical vector.
/// Exact-text overrides let a test pin specific geometry.
pub struct MockEmbeddings {
    /// Map of exact text → pinned embedding.
    responses: HashMap<String, Embedding>,
    /// Number of embed calls made.
    call_count: AtomicU32,
    /// Last text received.
    last_text: Mutex<Option<String>>,
}

impl MockEmbeddings {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            call_count: AtomicU32::new(0),
            last_text: Mutex::new(None),
        }
    }

    /// Pin an exact vector for a given text.
    pub fn with_response(mut self, text: &str, embedding: Embedding) -> Self {
        self.responses.insert(text.to_string(), embedding);
        self
    }

    /// Get the number of embed calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last text embedded by this provider.
    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }

    /// Deterministic fallback embedding: bytes folded into a fixed-width
    /// vector, scaled into [0, 1] per byte.
    pub fn fold_embedding(text: &str) -> Embedding {
        let mut values = vec![0.0f32; MOCK_DIM];
        for (i, byte) in text.bytes().enumerate() {
            values[i % MOCK_DIM] += byte as f32 / 255.0;
        }
        Embedding(values)
    }
}

impl Default for MockEmbeddings {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddings {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-fold-16"
    }

    async fn embed(&self, text: &str) -> anyhow::Result<Embedding> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_text.lock().unwrap() = Some(text.to_string());

        Ok(self
            .responses
            .get(text)
            .cloned()
            .unwrap_or_else(|| Self::fold_embedding(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identical_text_folds_identically() {
        let provider = MockEmbeddings::new();
        let first = provider.embed("the powerhouse of the cell").await.unwrap();
        let second = provider.embed("the powerhouse of the cell").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.dim(), MOCK_DIM);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn different_text_folds_differently() {
        let provider = MockEmbeddings::new();
        let a = provider.embed("newton").await.unwrap();
        let b = provider.embed("darwin").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn pinned_response_wins_over_fold() {
        let pinned = Embedding(vec![3.0, 4.0]);
        let provider = MockEmbeddings::new().with_response("F = ma", pinned.clone());

        let hit = provider.embed("F = ma").await.unwrap();
        assert_eq!(hit, pinned);

        let miss = provider.embed("something else").await.unwrap();
        assert_eq!(miss.dim(), MOCK_DIM);
        assert_eq!(provider.last_text().as_deref(), Some("something else"));
    }
}
