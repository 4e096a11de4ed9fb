//! Interactive session flows: quiz grading and the tutor assessment.
//!
//! Flows run sequentially; the only operations that block for long are
//! prompt reads and embedding calls. All user I/O goes through the
//! [`PromptSource`] and [`SessionReporter`] traits so automated runs can
//! script both sides.

use std::collections::VecDeque;
use std::str::FromStr;

use anyhow::Result;

use crate::error::SessionError;
use crate::grade::grade_answer;
use crate::model::{BankQuestion, QuestionBank, QuizAttempt, QuizItem, Subject};
use crate::report::{AssessmentReport, QuizReport};
use crate::scoring::{composite_score, ResponseScorer};
use crate::sentences::word_count;

/// Tunables for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiz items to request per run.
    pub questions: usize,
    /// Sentences to request from the summarizer.
    pub summary_sentences: usize,
    /// Attempts allowed per personality answer before the flow fails.
    pub max_answer_attempts: u32,
    /// Word minimum for a personality answer.
    pub min_answer_words: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            questions: 5,
            summary_sentences: 5,
            max_answer_attempts: 3,
            min_answer_words: 8,
        }
    }
}

/// Top-level menu action for a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    GenerateQuiz,
    Summarize,
}

impl FromStr for MenuChoice {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::GenerateQuiz),
            "2" => Ok(MenuChoice::Summarize),
            other => Err(SessionError::UnrecognizedChoice(other.to_string())),
        }
    }
}

/// Source of interactive answers.
pub trait PromptSource: Send {
    /// Show `prompt` and read one line. `None` when input is exhausted.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Scripted prompt source for automated runs: pops canned answers in order
/// and records every prompt it was shown.
pub struct ScriptedPrompts {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompts {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl PromptSource for ScriptedPrompts {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

/// Progress callbacks for user-facing feedback.
pub trait SessionReporter: Send + Sync {
    fn on_quiz_question(&self, index: usize, total: usize, item: &QuizItem);
    fn on_answer_graded(&self, attempt: &QuizAttempt);
    fn on_quiz_complete(&self, report: &QuizReport);
    fn on_invalid_subject(&self, input: &str);
    fn on_short_answer(&self, attempt: u32, max_attempts: u32, min_words: usize);
    fn on_assessment_complete(&self, report: &AssessmentReport);
}

/// No-op reporter.
pub struct NoopReporter;

impl SessionReporter for NoopReporter {
    fn on_quiz_question(&self, _: usize, _: usize, _: &QuizItem) {}
    fn on_answer_graded(&self, _: &QuizAttempt) {}
    fn on_quiz_complete(&self, _: &QuizReport) {}
    fn on_invalid_subject(&self, _: &str) {}
    fn on_short_answer(&self, _: u32, _: u32, _: usize) {}
    fn on_assessment_complete(&self, _: &AssessmentReport) {}
}

/// Present `items` in order, read one answer per item, grade, and
/// summarize.
pub fn run_quiz(
    items: &[QuizItem],
    input: &mut dyn PromptSource,
    reporter: &dyn SessionReporter,
) -> Result<QuizReport> {
    let mut attempts = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        reporter.on_quiz_question(index + 1, items.len(), item);
        let answer = input
            .ask("Your answer:")?
            .ok_or(SessionError::InputClosed)?;
        let attempt = grade_answer(item, &answer);
        reporter.on_answer_graded(&attempt);
        attempts.push(attempt);
    }
    let report = QuizReport::from_attempts(attempts);
    reporter.on_quiz_complete(&report);
    Ok(report)
}

/// Re-prompt until the input names a known subject.
pub fn prompt_subject(
    input: &mut dyn PromptSource,
    reporter: &dyn SessionReporter,
) -> Result<Subject> {
    loop {
        let line = input
            .ask("Enter the subject you want to teach (Maths/Physics/Chemistry/Biology):")?
            .ok_or(SessionError::InputClosed)?;
        match line.parse::<Subject>() {
            Ok(subject) => return Ok(subject),
            Err(_) => reporter.on_invalid_subject(&line),
        }
    }
}

/// Collect one free-form response per knowledge question. No validation.
fn collect_knowledge_answers(
    questions: &[BankQuestion],
    input: &mut dyn PromptSource,
) -> Result<Vec<String>> {
    let mut responses = Vec::with_capacity(questions.len());
    for question in questions {
        let answer = input
            .ask(&question.prompt)?
            .ok_or(SessionError::InputClosed)?;
        responses.push(answer);
    }
    Ok(responses)
}

/// Collect personality answers, re-prompting short ones up to the attempt
/// cap.
fn collect_personality_answers(
    questions: &[String],
    config: &SessionConfig,
    input: &mut dyn PromptSource,
    reporter: &dyn SessionReporter,
) -> Result<Vec<String>> {
    let mut responses = Vec::with_capacity(questions.len());
    for question in questions {
        let mut accepted = None;
        for attempt in 1..=config.max_answer_attempts {
            let answer = input.ask(question)?.ok_or(SessionError::InputClosed)?;
            if word_count(&answer) >= config.min_answer_words {
                accepted = Some(answer);
                break;
            }
            reporter.on_short_answer(attempt, config.max_answer_attempts, config.min_answer_words);
        }
        let answer = accepted.ok_or(SessionError::AnswerTooShort {
            attempts: config.max_answer_attempts,
            min_words: config.min_answer_words,
        })?;
        responses.push(answer);
    }
    Ok(responses)
}

/// Run the full assessment: subject, knowledge answers, personality
/// answers, scoring, report.
///
/// Passing `subject` skips the subject prompt.
pub async fn run_assessment(
    bank: &QuestionBank,
    subject: Option<Subject>,
    scorer: &ResponseScorer,
    config: &SessionConfig,
    input: &mut dyn PromptSource,
    reporter: &dyn SessionReporter,
) -> Result<AssessmentReport> {
    let subject = match subject {
        Some(s) => s,
        None => prompt_subject(input, reporter)?,
    };

    let questions = bank
        .questions_for(subject)
        .ok_or_else(|| SessionError::SubjectNotInBank {
            bank: bank.id.clone(),
            subject: subject.to_string(),
        })?;

    let knowledge_responses = collect_knowledge_answers(questions, input)?;
    let personality_responses =
        collect_personality_answers(&bank.personality_prompts, config, input, reporter)?;

    let pairs: Vec<(String, String)> = knowledge_responses
        .into_iter()
        .zip(questions.iter().map(|q| q.reference_answer.clone()))
        .collect();

    let knowledge = scorer.knowledge_depth(&pairs).await?;
    let personality = scorer.personality(&personality_responses).await?;
    let composite = composite_score(knowledge, personality);

    let report = AssessmentReport::new(bank, subject, knowledge, personality, composite);
    reporter.on_assessment_complete(&report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::FeedbackTier;
    use crate::model::Embedding;
    use crate::traits::EmbeddingProvider;
    use async_trait::async_trait;
    use std::sync::Arc;

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

    fn items(expected: &[&str]) -> Vec<QuizItem> {
        expected
            .iter()
            .map(|e| QuizItem {
                question: format!("{e} did something notable here?"),
                expected_answer: e.to_string(),
            })
            .collect()
    }

    const LONG_ANSWER: &str =
        "I walk through the idea step by step using examples the students already know";

    #[test]
    fn menu_choice_parsing() {
        assert_eq!("1".parse::<MenuChoice>().unwrap(), MenuChoice::GenerateQuiz);
        assert_eq!(" 2 ".parse::<MenuChoice>().unwrap(), MenuChoice::Summarize);
        assert!("3".parse::<MenuChoice>().is_err());
        assert!("quiz".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn quiz_flow_grades_in_order() {
        let items = items(&["newton", "cell", "entropy", "force", "atom"]);
        let mut input = ScriptedPrompts::new(["Newton", "wrong", "ENTROPY", "force", "nope"]);
        let report = run_quiz(&items, &mut input, &NoopReporter).unwrap();

        assert_eq!(report.total_points, 6);
        assert_eq!(report.tier, FeedbackTier::NeedsPractice);
        assert!(report.attempts[0].correct);
        assert!(!report.attempts[1].correct);
    }

    #[test]
    fn quiz_flow_fails_when_input_runs_dry() {
        let items = items(&["newton", "cell"]);
        let mut input = ScriptedPrompts::new(["Newton"]);
        let err = run_quiz(&items, &mut input, &NoopReporter).unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }

    #[test]
    fn subject_prompt_loops_past_invalid_input() {
        let mut input = ScriptedPrompts::new(["astrology", "", "ChEmIsTrY"]);
        let subject = prompt_subject(&mut input, &NoopReporter).unwrap();
        assert_eq!(subject, Subject::Chemistry);
        assert_eq!(input.asked().len(), 3);
    }

    #[test]
    fn subject_prompt_errors_when_input_closes() {
        let mut input = ScriptedPrompts::new(["astrology"]);
        let err = prompt_subject(&mut input, &NoopReporter).unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }

    #[test]
    fn personality_retry_is_bounded() {
        let config = SessionConfig::default();
        let questions = vec!["How do you keep lessons engaging?".to_string()];

        // three short answers exhaust the attempt cap
        let mut input = ScriptedPrompts::new(["too short", "still short", "nope"]);
        let err = collect_personality_answers(&questions, &config, &mut input, &NoopReporter)
            .unwrap_err();
        assert!(err.to_string().contains("after 3 attempts"));

        // a short answer followed by a long one is accepted
        let mut input = ScriptedPrompts::new(["too short", LONG_ANSWER]);
        let responses =
            collect_personality_answers(&questions, &config, &mut input, &NoopReporter).unwrap();
        assert_eq!(responses, vec![LONG_ANSWER.to_string()]);
    }

    #[tokio::test]
    async fn assessment_flow_end_to_end() {
        let bank = QuestionBank::builtin();
        let scorer = ResponseScorer::new(Arc::new(ConstantProvider));
        let config = SessionConfig::default();

        let mut answers: Vec<String> = vec!["physics".into()];
        answers.extend(std::iter::repeat("F = ma".to_string()).take(5));
        answers.extend(std::iter::repeat(LONG_ANSWER.to_string()).take(5));
        let mut input = ScriptedPrompts::new(answers);

        let report = run_assessment(&bank, None, &scorer, &config, &mut input, &NoopReporter)
            .await
            .unwrap();

        assert_eq!(report.subject, Subject::Physics);
        // identical constant embeddings: cosine one per pair, mean norm five
        assert_eq!(report.knowledge_score, 10.0);
        assert_eq!(report.personality_score, 6.0);
        assert_eq!(report.composite_score, 8.0);
        // one subject prompt, five knowledge, five personality
        assert_eq!(input.asked().len(), 11);
    }

    #[tokio::test]
    async fn assessment_with_preselected_subject_skips_the_prompt() {
        let bank = QuestionBank::builtin();
        let scorer = ResponseScorer::new(Arc::new(ConstantProvider));
        let config = SessionConfig::default();

        let mut answers: Vec<String> = std::iter::repeat("Cell".to_string()).take(5).collect();
        answers.extend(std::iter::repeat(LONG_ANSWER.to_string()).take(5));
        let mut input = ScriptedPrompts::new(answers);

        let report = run_assessment(
            &bank,
            Some(Subject::Biology),
            &scorer,
            &config,
            &mut input,
            &NoopReporter,
        )
        .await
        .unwrap();

        assert_eq!(report.subject, Subject::Biology);
        assert_eq!(input.asked().len(), 10);
    }
}
