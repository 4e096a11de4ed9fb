//! The `tutorbench assess` command.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use comfy_table::Table;

use tutorbench_core::bank::{parse_bank, validate_bank};
use tutorbench_core::model::{QuestionBank, Subject};
use tutorbench_core::report::AssessmentReport;
use tutorbench_core::scoring::ResponseScorer;
use tutorbench_core::session::run_assessment;
use tutorbench_embeddings::config::load_config_from;

use crate::commands::default_provider;
use crate::interact::{ConsoleReporter, StdinPrompts};

pub async fn execute(
    subject: Option<String>,
    bank_path: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let bank = match &bank_path {
        Some(path) => {
            let bank = parse_bank(path)?;
            for warning in validate_bank(&bank) {
                tracing::warn!("{}: {}", bank.id, warning.message);
            }
            bank
        }
        None => QuestionBank::builtin(),
    };

    let subject = subject
        .map(|s| Subject::from_str(&s).map_err(|e| anyhow::anyhow!(e)))
        .transpose()?;

    let provider = default_provider(&config)?;
    let scorer = ResponseScorer::new(provider);
    let session = config.session_config();

    let mut prompts = StdinPrompts;
    let report = run_assessment(
        &bank,
        subject,
        &scorer,
        &session,
        &mut prompts,
        &ConsoleReporter,
    )
    .await?;

    print_results(&report);

    if let Some(path) = output {
        report.save_json(&path)?;
        println!("Assessment report saved to: {}", path.display());
    }

    Ok(())
}

fn print_results(report: &AssessmentReport) {
    let mut table = Table::new();
    table.set_header(vec!["Score", "Value"]);
    table.add_row(vec![
        "Personality".to_string(),
        format!("{}/10", report.personality_score),
    ]);
    table.add_row(vec![
        format!("Knowledge depth ({})", report.subject),
        format!("{}/10", report.knowledge_score),
    ]);
    table.add_row(vec![
        "Final".to_string(),
        format!("{}/10", report.composite_score),
    ]);

    println!("\n--- Assessment results ---\n{table}");
}
