//! Quiz item generation.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::QuizItem;
use crate::traits::AnswerExtractor;

/// Default number of quiz items per run.
pub const DEFAULT_QUESTIONS: usize = 5;

/// Sample up to `requested` sentences without replacement and build one
/// quiz item per sampled sentence.
///
/// When fewer sentences are available the quiz silently shrinks to match;
/// no error, no padding. Item order is the sampled order; callers present
/// items as-is.
pub fn generate_quiz<R: Rng + ?Sized>(
    sentences: &[String],
    requested: usize,
    extractor: &dyn AnswerExtractor,
    rng: &mut R,
) -> Vec<QuizItem> {
    let count = requested.min(sentences.len());
    sentences
        .choose_multiple(rng, count)
        .filter_map(|sentence| {
            let trimmed = sentence.trim();
            let expected_answer = extractor.expected_answer(trimmed)?;
            Some(QuizItem {
                question: format!("{trimmed}?"),
                expected_answer,
            })
        })
        .collect()
}
