//! TOML question-bank parser, validation, and the builtin bank.
//!
//! Loads banks from TOML files and directories, and validates them against
//! the assumptions the scoring pipeline makes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{BankQuestion, QuestionBank, Subject, SubjectQuestions};

/// Knowledge questions the scoring denominator assumes per subject.
pub const EXPECTED_QUESTIONS: usize = 5;

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    subjects: Vec<TomlSubject>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    personality: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlSubject {
    name: String,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    answer: String,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let subjects = parsed
        .subjects
        .into_iter()
        .map(|s| {
            let subject: Subject = s
                .name
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}: {}", source_path.display(), e))?;
            let questions = s
                .questions
                .into_iter()
                .map(|q| BankQuestion {
                    prompt: q.prompt,
                    reference_answer: q.answer,
                })
                .collect();
            Ok(SubjectQuestions { subject, questions })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        personality_prompts: parsed.bank.personality,
        subjects,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The subject concerned (if applicable).
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for common issues.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate subject sections
    let mut seen = std::collections::HashSet::new();
    for section in &bank.subjects {
        if !seen.insert(section.subject) {
            warnings.push(ValidationWarning {
                subject: Some(section.subject.to_string()),
                message: format!("duplicate subject section: {}", section.subject),
            });
        }
    }

    // Question count drift from the fixed scoring denominator
    for section in &bank.subjects {
        if section.questions.len() != EXPECTED_QUESTIONS {
            warnings.push(ValidationWarning {
                subject: Some(section.subject.to_string()),
                message: format!(
                    "{} questions found; scoring assumes {EXPECTED_QUESTIONS} per subject",
                    section.questions.len()
                ),
            });
        }
    }

    // Empty prompts or answers
    for section in &bank.subjects {
        for question in &section.questions {
            if question.prompt.trim().is_empty() {
                warnings.push(ValidationWarning {
                    subject: Some(section.subject.to_string()),
                    message: "question prompt is empty".into(),
                });
            }
            if question.reference_answer.trim().is_empty() {
                warnings.push(ValidationWarning {
                    subject: Some(section.subject.to_string()),
                    message: format!("reference answer is empty for: {}", question.prompt),
                });
            }
        }
    }

    // Personality prompts
    if bank.personality_prompts.is_empty() {
        warnings.push(ValidationWarning {
            subject: None,
            message: "bank has no personality prompts".into(),
        });
    }
    for prompt in &bank.personality_prompts {
        if prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                subject: None,
                message: "personality prompt is empty".into(),
            });
        }
    }

    warnings
}

impl QuestionBank {
    /// The builtin four-subject bank with its personality prompts.
    pub fn builtin() -> Self {
        fn q(prompt: &str, answer: &str) -> BankQuestion {
            BankQuestion {
                prompt: prompt.to_string(),
                reference_answer: answer.to_string(),
            }
        }

        QuestionBank {
            id: "builtin".into(),
            name: "Builtin Bank".into(),
            description: "Four-subject tutor assessment bank, easy to hard".into(),
            personality_prompts: vec![
                "When teaching, how do you explain a difficult concept so that students can understand it clearly?".into(),
                "Describe a time when you motivated someone to keep learning despite challenges.".into(),
                "How do you stay patient and supportive when students are struggling to grasp a topic?".into(),
                "What strategies do you use to keep your lessons organized and engaging?".into(),
                "How do you handle stressful teaching situations, such as when multiple students are confused?".into(),
            ],
            subjects: vec![
                SubjectQuestions {
                    subject: Subject::Maths,
                    questions: vec![
                        q("What is the derivative of x^2?", "2x"),
                        q("Solve for x: 2x + 5 = 15", "5"),
                        q("What is the integral of sin(x)?", "-cos(x) + C"),
                        q(
                            "Explain the difference between permutation and combination.",
                            "Permutation = order matters, Combination = order doesn't",
                        ),
                        q(
                            "Prove that sqrt(2) is irrational.",
                            "Proof by contradiction with even/odd integers",
                        ),
                    ],
                },
                SubjectQuestions {
                    subject: Subject::Physics,
                    questions: vec![
                        q("State Newton's Second Law of Motion.", "F = ma"),
                        q("What is the SI unit of force?", "Newton"),
                        q(
                            "What is the difference between speed and velocity?",
                            "Speed = scalar, Velocity = vector",
                        ),
                        q(
                            "Explain the concept of relativity of simultaneity.",
                            "Events can occur simultaneously in one frame but not in another",
                        ),
                        q(
                            "Derive the expression for kinetic energy in terms of momentum.",
                            "KE = p^2 / 2m",
                        ),
                    ],
                },
                SubjectQuestions {
                    subject: Subject::Chemistry,
                    questions: vec![
                        q("What is the atomic number of Oxygen?", "8"),
                        q(
                            "Write the balanced equation for combustion of methane (CH4).",
                            "CH4 + 2O2 -> CO2 + 2H2O",
                        ),
                        q("What is the pH of a neutral solution at 25 C?", "7"),
                        q(
                            "Explain Le Chatelier's principle with an example.",
                            "System shifts to counteract change",
                        ),
                        q("Explain hybridization in methane (CH4).", "sp3 hybridization"),
                    ],
                },
                SubjectQuestions {
                    subject: Subject::Biology,
                    questions: vec![
                        q(
                            "What is the basic structural and functional unit of life?",
                            "Cell",
                        ),
                        q(
                            "What is the role of mitochondria in a cell?",
                            "Powerhouse, produces ATP",
                        ),
                        q(
                            "Explain the process of transcription in protein synthesis.",
                            "DNA -> mRNA using RNA polymerase",
                        ),
                        q(
                            "What is the difference between mitosis and meiosis?",
                            "Mitosis = identical cells, Meiosis = gametes with half chromosomes",
                        ),
                        q(
                            "Explain the theory of natural selection by Darwin.",
                            "Survival of fittest through variation and selection",
                        ),
                    ],
                },
            ],
        }
    }
}
