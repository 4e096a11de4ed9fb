//! The `tutorbench study` command.

use std::path::PathBuf;

use anyhow::Result;
use rand::thread_rng;

use tutorbench_core::error::SessionError;
use tutorbench_core::quiz::generate_quiz;
use tutorbench_core::sentences::qualifying_sentences;
use tutorbench_core::session::{run_quiz, MenuChoice, PromptSource};
use tutorbench_core::summary::CentroidSummarizer;
use tutorbench_core::traits::{DocumentSource, FileSource, FirstTokenExtractor, Summarizer};
use tutorbench_embeddings::config::load_config_from;

use crate::commands::default_provider;
use crate::interact::{ConsoleReporter, StdinPrompts};

pub async fn execute(
    document: PathBuf,
    questions: Option<usize>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let session = config.session_config();
    let questions = questions.unwrap_or(session.questions);

    let text = FileSource.load(&document)?;
    println!("Document loaded ({} characters).", text.len());

    let mut prompts = StdinPrompts;
    println!("\nWhat would you like to do?");
    println!("1. Generate quiz");
    println!("2. Summarize document");
    let line = prompts
        .ask("Enter choice (1/2):")?
        .ok_or(SessionError::InputClosed)?;
    let choice: MenuChoice = line.parse()?;

    match choice {
        MenuChoice::GenerateQuiz => {
            let sentences = qualifying_sentences(&text);
            let items = generate_quiz(
                &sentences,
                questions,
                &FirstTokenExtractor,
                &mut thread_rng(),
            );
            if items.is_empty() {
                println!("No quiz-worthy sentences found in the document.");
                return Ok(());
            }
            if items.len() < questions {
                println!(
                    "Only {} qualifying sentences available; quiz shortened to match.",
                    items.len()
                );
            }

            let report = run_quiz(&items, &mut prompts, &ConsoleReporter)?;

            if let Some(path) = output {
                report.save_json(&path)?;
                println!("Quiz report saved to: {}", path.display());
            }
        }
        MenuChoice::Summarize => {
            let provider = default_provider(&config)?;
            let summarizer = CentroidSummarizer::new(provider);
            let sentences = summarizer.summarize(&text, session.summary_sentences).await?;

            println!("\nSummary of the document:\n");
            for sentence in &sentences {
                println!("- {sentence}");
            }
        }
    }

    Ok(())
}
