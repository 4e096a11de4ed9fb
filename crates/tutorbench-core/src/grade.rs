//! Answer grading and feedback tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{QuizAttempt, QuizItem};

/// Points awarded for a correct answer.
pub const POINTS_PER_CORRECT: u32 = 2;

/// Fixed scoring denominator. The tier thresholds below assume a five-item
/// quiz; a shorter quiz keeps the same denominator.
pub const MAX_POINTS: u32 = 10;

/// Coarse qualitative bucket derived from the total points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    ReviseBasics,
    NeedsPractice,
    StrongKnowledge,
}

impl FeedbackTier {
    /// Classify a point total against the fixed thresholds.
    pub fn from_points(total: u32) -> Self {
        if total <= 4 {
            FeedbackTier::ReviseBasics
        } else if total <= 7 {
            FeedbackTier::NeedsPractice
        } else {
            FeedbackTier::StrongKnowledge
        }
    }
}

impl fmt::Display for FeedbackTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackTier::ReviseBasics => write!(f, "revise basics"),
            FeedbackTier::NeedsPractice => write!(f, "needs practice"),
            FeedbackTier::StrongKnowledge => write!(f, "strong knowledge"),
        }
    }
}

/// Grade one answer: whitespace-trimmed, case-insensitive exact match.
pub fn grade_answer(item: &QuizItem, user_answer: &str) -> QuizAttempt {
    let trimmed = user_answer.trim();
    let correct = trimmed.to_lowercase() == item.expected_answer.to_lowercase();
    QuizAttempt {
        item: item.clone(),
        user_answer: trimmed.to_string(),
        correct,
        points_awarded: if correct { POINTS_PER_CORRECT } else { 0 },
    }
}

/// Sum of points across attempts.
pub fn total_points(attempts: &[QuizAttempt]) -> u32 {
    attempts.iter().map(|a| a.points_awarded).sum()
}
