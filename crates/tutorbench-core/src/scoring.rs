//! Knowledge-depth and personality scoring over embeddings.

use std::sync::Arc;

use anyhow::Result;

use crate::model::Embedding;
use crate::traits::EmbeddingProvider;

/// Round to one decimal place.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Knowledge depth from precomputed pair similarities: average, scaled to
/// ten, one decimal.
///
/// Not clamped. Cosine similarity can be negative, so the result can fall
/// below zero; callers see the raw value.
pub fn knowledge_score(similarities: &[f64]) -> f64 {
    round1(mean(similarities) * 10.0)
}

/// Personality score from the mean embedding's norm: `(norm mod 10) + 1`,
/// one decimal. The modulo keeps the value bounded regardless of how large
/// the norm grows.
pub fn personality_score_from_norm(norm: f64) -> f64 {
    round1(norm % 10.0 + 1.0)
}

/// Composite of the two sub-scores: arithmetic mean, one decimal. Input
/// ranges are not validated; an out-of-range sub-score propagates.
pub fn composite_score(knowledge: f64, personality: f64) -> f64 {
    round1((knowledge + personality) / 2.0)
}

/// Scores free-form responses through an embedding provider.
pub struct ResponseScorer {
    provider: Arc<dyn EmbeddingProvider>,
}

impl ResponseScorer {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    /// Average cosine similarity between each candidate answer and its
    /// reference, scaled to ten.
    ///
    /// A pair with an undefined angle (zero-magnitude embedding)
    /// contributes zero similarity.
    pub async fn knowledge_depth(&self, pairs: &[(String, String)]) -> Result<f64> {
        let mut similarities = Vec::with_capacity(pairs.len());
        for (candidate, reference) in pairs {
            let candidate_emb = self.provider.embed(candidate).await?;
            let reference_emb = self.provider.embed(reference).await?;
            similarities.push(
                candidate_emb
                    .cosine_similarity(&reference_emb)
                    .unwrap_or(0.0),
            );
        }
        Ok(knowledge_score(&similarities))
    }

    /// Norm of the elementwise mean embedding, folded into the one-to-ten
    /// band.
    pub async fn personality(&self, responses: &[String]) -> Result<f64> {
        anyhow::ensure!(!responses.is_empty(), "no personality responses to score");
        let mut embeddings = Vec::with_capacity(responses.len());
        for response in responses {
            embeddings.push(self.provider.embed(response).await?);
        }
        let mean_embedding = Embedding::mean(&embeddings)
            .ok_or_else(|| anyhow::anyhow!("embedding dimensions disagree across responses"))?;
        Ok(personality_score_from_norm(mean_embedding.norm()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Deterministic byte-fold embedding, four dimensions.
    struct FakeProvider;

    #[async_trait]
    impl EmbeddingProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        fn model(&self) -> &str {
            "fake-fold-4"
        }

        async fn embed(&self, text: &str) -> Result<Embedding> {
            let mut acc = [0.0f32; 4];
            for (i, byte) in text.bytes().enumerate() {
                acc[i % 4] += byte as f32 / 255.0;
            }
            Ok(Embedding(acc.to_vec()))
        }
    }

    /// Always returns the same vector, norm five.
    struct ConstantProvider;

    #[async_trait]
    impl EmbeddingProvider for ConstantProvider {
        fn name(&self) -> &str {
            "constant"
        }

        fn model(&self) -> &str {
            "constant-3-4"
        }

        async fn embed(&self, _text: &str) -> Result<Embedding> {
            Ok(Embedding(vec![3.0, 4.0]))
        }
    }

    #[test]
    fn knowledge_score_scales_and_rounds() {
        assert_eq!(knowledge_score(&[1.0, 1.0, 1.0]), 10.0);
        assert_eq!(knowledge_score(&[0.8]), 8.0);
        assert_eq!(knowledge_score(&[0.5, 0.25]), 3.8);
        assert_eq!(knowledge_score(&[]), 0.0);
    }

    #[test]
    fn knowledge_score_is_not_clamped() {
        // negative similarities pull the score below zero
        assert_eq!(knowledge_score(&[-1.0, -1.0]), -10.0);
        assert_eq!(knowledge_score(&[-0.5, 0.1]), -2.0);
    }

    #[test]
    fn personality_score_maps_norm_into_band() {
        assert_eq!(personality_score_from_norm(0.0), 1.0);
        assert_eq!(personality_score_from_norm(5.0), 6.0);
        assert_eq!(personality_score_from_norm(12.0), 3.0);
        assert_eq!(personality_score_from_norm(99.5), 10.5);
    }

    #[test]
    fn personality_score_stays_bounded_for_arbitrary_norms() {
        for i in 0..2000 {
            let norm = i as f64 * 0.37;
            let score = personality_score_from_norm(norm);
            assert!(score >= 1.0, "score {score} below band for norm {norm}");
            assert!(score < 11.0, "score {score} above band for norm {norm}");
        }
        // zero vector maps to exactly one
        assert_eq!(personality_score_from_norm(Embedding(vec![0.0; 8]).norm()), 1.0);
    }

    #[test]
    fn composite_is_rounded_mean() {
        assert_eq!(composite_score(8.0, 6.0), 7.0);
        assert_eq!(composite_score(7.3, 6.0), 6.7);
        // out-of-range inputs propagate untouched
        assert_eq!(composite_score(-10.0, 6.0), -2.0);
    }

    #[tokio::test]
    async fn knowledge_depth_of_identical_texts_is_ten() {
        let scorer = ResponseScorer::new(Arc::new(FakeProvider));
        let pairs = vec![("F = ma".to_string(), "F = ma".to_string())];
        let score = scorer.knowledge_depth(&pairs).await.unwrap();
        assert_eq!(score, 10.0);
    }

    #[tokio::test]
    async fn knowledge_depth_is_deterministic() {
        let scorer = ResponseScorer::new(Arc::new(FakeProvider));
        let pairs = vec![
            ("force equals mass times acceleration".to_string(), "F = ma".to_string()),
            ("the unit of force is the newton".to_string(), "Newton".to_string()),
        ];
        let first = scorer.knowledge_depth(&pairs).await.unwrap();
        let second = scorer.knowledge_depth(&pairs).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn personality_with_constant_embeddings() {
        let scorer = ResponseScorer::new(Arc::new(ConstantProvider));
        let responses = vec!["anything at all".to_string(); 5];
        // every embedding is (3, 4), so the mean has norm five
        let score = scorer.personality(&responses).await.unwrap();
        assert_eq!(score, 6.0);
    }

    #[tokio::test]
    async fn personality_rejects_empty_input() {
        let scorer = ResponseScorer::new(Arc::new(ConstantProvider));
        assert!(scorer.personality(&[]).await.is_err());
    }
}
