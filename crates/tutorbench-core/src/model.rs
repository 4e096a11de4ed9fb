//! Core data model types for tutorbench.
//!
//! These are the fundamental types the quiz and assessment pipelines use to
//! represent subjects, question banks, quiz items, and embeddings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A subject a candidate can be assessed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Maths,
    Physics,
    Chemistry,
    Biology,
}

impl Subject {
    /// All known subjects, in bank order.
    pub const ALL: [Subject; 4] = [
        Subject::Maths,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
    ];
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Maths => write!(f, "Maths"),
            Subject::Physics => write!(f, "Physics"),
            Subject::Chemistry => write!(f, "Chemistry"),
            Subject::Biology => write!(f, "Biology"),
        }
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "maths" => Ok(Subject::Maths),
            "physics" => Ok(Subject::Physics),
            "chemistry" => Ok(Subject::Chemistry),
            "biology" => Ok(Subject::Biology),
            other => Err(format!("unknown subject: {other}")),
        }
    }
}

/// A knowledge question with the reference answer responses are scored
/// against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankQuestion {
    /// The question shown to the candidate.
    pub prompt: String,
    /// Reference answer used for similarity scoring.
    pub reference_answer: String,
}

/// Knowledge questions for one subject, ordered easy to hard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectQuestions {
    pub subject: Subject,
    pub questions: Vec<BankQuestion>,
}

/// An immutable question bank: per-subject knowledge questions plus
/// open-ended personality prompts.
///
/// Constructed once at startup (builtin or from TOML) and passed explicitly
/// to the flows that need it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this bank.
    #[serde(default)]
    pub description: String,
    /// Open-ended prompts expecting long-form answers.
    #[serde(default)]
    pub personality_prompts: Vec<String>,
    /// Knowledge questions grouped by subject.
    #[serde(default)]
    pub subjects: Vec<SubjectQuestions>,
}

impl QuestionBank {
    /// Knowledge questions for `subject`, if the bank covers it.
    pub fn questions_for(&self, subject: Subject) -> Option<&[BankQuestion]> {
        self.subjects
            .iter()
            .find(|s| s.subject == subject)
            .map(|s| s.questions.as_slice())
    }

    /// Subjects this bank covers, in bank order.
    pub fn available_subjects(&self) -> Vec<Subject> {
        self.subjects.iter().map(|s| s.subject).collect()
    }
}

/// One generated quiz item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    /// The question shown to the user.
    pub question: String,
    /// The token a user answer is matched against.
    pub expected_answer: String,
}

/// A graded answer to a single quiz item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub item: QuizItem,
    /// The user's answer, whitespace-trimmed.
    pub user_answer: String,
    pub correct: bool,
    pub points_awarded: u32,
}

/// A fixed-dimension embedding vector.
///
/// Scoring consumes exactly two operations on it, Euclidean norm and cosine
/// similarity. Accumulation happens in f64 regardless of element width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding(pub Vec<f32>);

impl Embedding {
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Euclidean (L2) norm.
    pub fn norm(&self) -> f64 {
        self.0
            .iter()
            .map(|&x| (x as f64) * (x as f64))
            .sum::<f64>()
            .sqrt()
    }

    /// Cosine similarity with `other`.
    ///
    /// `None` when the dimensions differ or either vector has zero
    /// magnitude (the angle is undefined).
    pub fn cosine_similarity(&self, other: &Embedding) -> Option<f64> {
        if self.0.len() != other.0.len() || self.0.is_empty() {
            return None;
        }
        let mut dot = 0.0f64;
        let mut norm_a = 0.0f64;
        let mut norm_b = 0.0f64;
        for (&x, &y) in self.0.iter().zip(&other.0) {
            let (x64, y64) = (x as f64, y as f64);
            dot += x64 * y64;
            norm_a += x64 * x64;
            norm_b += y64 * y64;
        }
        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom == 0.0 {
            return None;
        }
        Some(dot / denom)
    }

    /// Elementwise mean of a batch.
    ///
    /// `None` when the batch is empty or the dimensions disagree.
    pub fn mean(batch: &[Embedding]) -> Option<Embedding> {
        let first = batch.first()?;
        let dim = first.dim();
        if batch.iter().any(|e| e.dim() != dim) {
            return None;
        }
        let mut acc = vec![0.0f64; dim];
        for e in batch {
            for (slot, &x) in acc.iter_mut().zip(&e.0) {
                *slot += x as f64;
            }
        }
        let n = batch.len() as f64;
        Some(Embedding(acc.into_iter().map(|x| (x / n) as f32).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_display_and_parse() {
        assert_eq!(Subject::Physics.to_string(), "Physics");
        assert_eq!("physics".parse::<Subject>().unwrap(), Subject::Physics);
        assert_eq!("  MATHS ".parse::<Subject>().unwrap(), Subject::Maths);
        assert_eq!("Biology".parse::<Subject>().unwrap(), Subject::Biology);
        assert!("history".parse::<Subject>().is_err());
    }

    #[test]
    fn questions_for_known_and_unknown_subject() {
        let bank = QuestionBank {
            id: "b".into(),
            name: "B".into(),
            description: String::new(),
            personality_prompts: vec![],
            subjects: vec![SubjectQuestions {
                subject: Subject::Physics,
                questions: vec![BankQuestion {
                    prompt: "q".into(),
                    reference_answer: "a".into(),
                }],
            }],
        };
        assert_eq!(bank.questions_for(Subject::Physics).unwrap().len(), 1);
        assert!(bank.questions_for(Subject::Biology).is_none());
        assert_eq!(bank.available_subjects(), vec![Subject::Physics]);
    }

    #[test]
    fn norm_of_three_four_is_five() {
        let e = Embedding(vec![3.0, 4.0]);
        assert!((e.norm() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let a = Embedding(vec![1.0, 2.0, 3.0]);
        let b = Embedding(vec![2.0, 4.0, 6.0]);
        let sim = a.cosine_similarity(&b).unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        let a = Embedding(vec![1.0, 0.0]);
        let b = Embedding(vec![0.0, 1.0]);
        let sim = a.cosine_similarity(&b).unwrap();
        assert!(sim.abs() < 1e-9);
    }

    #[test]
    fn cosine_of_opposite_vectors_is_negative() {
        let a = Embedding(vec![1.0, 1.0]);
        let b = Embedding(vec![-1.0, -1.0]);
        let sim = a.cosine_similarity(&b).unwrap();
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_undefined_for_zero_or_mismatched_vectors() {
        let zero = Embedding(vec![0.0, 0.0]);
        let a = Embedding(vec![1.0, 2.0]);
        let short = Embedding(vec![1.0]);
        assert!(zero.cosine_similarity(&a).is_none());
        assert!(a.cosine_similarity(&short).is_none());
    }

    #[test]
    fn mean_embedding() {
        let batch = vec![Embedding(vec![1.0, 3.0]), Embedding(vec![3.0, 5.0])];
        let mean = Embedding::mean(&batch).unwrap();
        assert_eq!(mean, Embedding(vec![2.0, 4.0]));

        assert!(Embedding::mean(&[]).is_none());
        let mismatched = vec![Embedding(vec![1.0]), Embedding(vec![1.0, 2.0])];
        assert!(Embedding::mean(&mismatched).is_none());
    }

    #[test]
    fn quiz_item_serde_roundtrip() {
        let item = QuizItem {
            question: "newton formulated three laws of motion?".into(),
            expected_answer: "newton".into(),
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: QuizItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
