//! The `tutorbench init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create tutorbench.toml
    if std::path::Path::new("tutorbench.toml").exists() {
        println!("tutorbench.toml already exists, skipping.");
    } else {
        std::fs::write("tutorbench.toml", SAMPLE_CONFIG)?;
        println!("Created tutorbench.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit tutorbench.toml (API key, or point it at a local Ollama)");
    println!("  2. Run: tutorbench validate --bank banks/example.toml");
    println!("  3. Run: tutorbench assess --bank banks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# tutorbench configuration

default_provider = "ollama"
default_model = "nomic-embed-text"
quiz_questions = 5
summary_sentences = 5
max_answer_attempts = 3

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"

[providers.mock]
type = "mock"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"
description = "A single-subject bank to get started"
personality = [
    "When teaching, how do you explain a difficult concept so that students can understand it clearly?",
    "Describe a time when you motivated someone to keep learning despite challenges.",
    "How do you stay patient and supportive when students are struggling to grasp a topic?",
    "What strategies do you use to keep your lessons organized and engaging?",
    "How do you handle stressful teaching situations, such as when multiple students are confused?",
]

[[subjects]]
name = "physics"

[[subjects.questions]]
prompt = "State Newton's Second Law of Motion."
answer = "F = ma"

[[subjects.questions]]
prompt = "What is the SI unit of force?"
answer = "Newton"

[[subjects.questions]]
prompt = "What is the difference between speed and velocity?"
answer = "Speed = scalar, Velocity = vector"

[[subjects.questions]]
prompt = "Explain the concept of relativity of simultaneity."
answer = "Events can occur simultaneously in one frame but not in another"

[[subjects.questions]]
prompt = "Derive the expression for kinetic energy in terms of momentum."
answer = "KE = p^2 / 2m"
"#;
