//! tutorbench CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod interact;

#[derive(Parser)]
#[command(
    name = "tutorbench",
    version,
    about = "Document quiz and tutor assessment harness"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a document, then generate a quiz or summarize it
    Study {
        /// Path to a plain-text document
        #[arg(long)]
        document: PathBuf,

        /// Quiz items to generate (overrides config)
        #[arg(long)]
        questions: Option<usize>,

        /// Write the quiz report as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run the tutor assessment
    Assess {
        /// Subject to assess (skips the subject prompt)
        #[arg(long)]
        subject: Option<String>,

        /// Question bank TOML (defaults to the builtin bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Write the assessment report as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tutorbench=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Study {
            document,
            questions,
            output,
            config,
        } => commands::study::execute(document, questions, output, config).await,
        Commands::Assess {
            subject,
            bank,
            output,
            config,
        } => commands::assess::execute(subject, bank, output, config).await,
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
