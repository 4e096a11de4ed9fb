//! Session report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grade::{total_points, FeedbackTier, MAX_POINTS};
use crate::model::{QuestionBank, QuizAttempt, Subject};

/// Result of one graded quiz run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Per-item graded attempts, in presentation order.
    pub attempts: Vec<QuizAttempt>,
    /// Points earned.
    pub total_points: u32,
    /// Fixed denominator; stays at ten even for a shortened quiz.
    pub max_points: u32,
    /// Feedback tier for the total.
    pub tier: FeedbackTier,
}

impl QuizReport {
    /// Build a report from graded attempts.
    pub fn from_attempts(attempts: Vec<QuizAttempt>) -> Self {
        let total = total_points(&attempts);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            attempts,
            total_points: total,
            max_points: MAX_POINTS,
            tier: FeedbackTier::from_points(total),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

/// Summary of the bank an assessment ran against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    /// Knowledge questions asked for the assessed subject.
    pub question_count: usize,
}

/// Result of one tutor assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Subject the candidate was assessed on.
    pub subject: Subject,
    /// Bank the questions came from.
    pub bank: BankSummary,
    pub knowledge_score: f64,
    pub personality_score: f64,
    pub composite_score: f64,
}

impl AssessmentReport {
    pub fn new(
        bank: &QuestionBank,
        subject: Subject,
        knowledge_score: f64,
        personality_score: f64,
        composite_score: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            subject,
            bank: BankSummary {
                id: bank.id.clone(),
                name: bank.name.clone(),
                question_count: bank.questions_for(subject).map(<[_]>::len).unwrap_or(0),
            },
            knowledge_score,
            personality_score,
            composite_score,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report from {}", path.display()))?;
    serde_json::from_str(&content).context("failed to parse report JSON")
}
