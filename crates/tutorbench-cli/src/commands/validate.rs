//! The `tutorbench validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        tutorbench_core::bank::load_bank_directory(&bank_path)?
    } else {
        vec![tutorbench_core::bank::parse_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        println!(
            "Question bank: {} ({} subjects, {} personality prompts)",
            bank.name,
            bank.subjects.len(),
            bank.personality_prompts.len()
        );

        let warnings = tutorbench_core::bank::validate_bank(bank);
        for w in &warnings {
            let prefix = w
                .subject
                .as_ref()
                .map(|s| format!("  [{s}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
