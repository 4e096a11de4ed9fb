//! Interactive stdin prompting and console feedback.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use tutorbench_core::model::{QuizAttempt, QuizItem};
use tutorbench_core::report::{AssessmentReport, QuizReport};
use tutorbench_core::session::{PromptSource, SessionReporter};

/// Reads answers from stdin, one line per prompt.
pub struct StdinPrompts;

impl PromptSource for StdinPrompts {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt} ");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Prints per-question feedback and the final quiz summary to the terminal.
pub struct ConsoleReporter;

impl SessionReporter for ConsoleReporter {
    fn on_quiz_question(&self, index: usize, total: usize, item: &QuizItem) {
        println!("\n{index}/{total}. {}", item.question);
    }

    fn on_answer_graded(&self, attempt: &QuizAttempt) {
        if attempt.correct {
            println!("Correct!");
        } else {
            println!("Wrong. Correct answer: {}", attempt.item.expected_answer);
        }
    }

    fn on_quiz_complete(&self, report: &QuizReport) {
        println!("\nFinal score: {}/{}", report.total_points, report.max_points);
        println!("Focus area: {}", report.tier);
    }

    fn on_invalid_subject(&self, input: &str) {
        println!(
            "Invalid subject '{}'. Expected one of: Maths, Physics, Chemistry, Biology",
            input.trim()
        );
    }

    fn on_short_answer(&self, attempt: u32, max_attempts: u32, min_words: usize) {
        println!(
            "Please write a longer response (at least {min_words} words). Attempt {attempt}/{max_attempts}."
        );
    }

    fn on_assessment_complete(&self, _report: &AssessmentReport) {
        // the assess command renders the results table itself
    }
}
