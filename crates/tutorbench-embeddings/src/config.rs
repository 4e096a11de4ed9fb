//! Embedding backend configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tutorbench_core::session::SessionConfig;
use tutorbench_core::traits::EmbeddingProvider;

use crate::mock::MockEmbeddings;
use crate::ollama::OllamaEmbeddings;
use crate::openai::OpenAiEmbeddings;

/// Configuration for a single embedding backend.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmbeddingConfig {
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
    },
    /// Deterministic offline embeddings; no network, no model load.
    Mock,
}

impl std::fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            EmbeddingConfig::Ollama { base_url } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .finish(),
            EmbeddingConfig::Mock => f.debug_struct("Mock").finish(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

/// Top-level tutorbench configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorbenchConfig {
    /// Embedding backend configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, EmbeddingConfig>,
    /// Default backend to use.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Default embedding model to use.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Quiz items requested per study run.
    #[serde(default = "default_questions")]
    pub quiz_questions: usize,
    /// Sentences requested from the summarizer.
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,
    /// Attempts allowed per personality answer.
    #[serde(default = "default_answer_attempts")]
    pub max_answer_attempts: u32,
}

fn default_provider() -> String {
    "ollama".to_string()
}
fn default_model() -> String {
    "nomic-embed-text".to_string()
}
fn default_questions() -> usize {
    5
}
fn default_summary_sentences() -> usize {
    5
}
fn default_answer_attempts() -> u32 {
    3
}

impl Default for TutorbenchConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: default_model(),
            quiz_questions: default_questions(),
            summary_sentences: default_summary_sentences(),
            max_answer_attempts: default_answer_attempts(),
        }
    }
}

impl TutorbenchConfig {
    /// Map the tunables onto a core session configuration.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            questions: self.quiz_questions,
            summary_sentences: self.summary_sentences,
            max_answer_attempts: self.max_answer_attempts,
            ..SessionConfig::default()
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a backend config.
fn resolve_embedding_config(config: &EmbeddingConfig) -> EmbeddingConfig {
    match config {
        EmbeddingConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => EmbeddingConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            org_id: org_id.as_ref().map(|o| resolve_env_vars(o)),
        },
        EmbeddingConfig::Ollama { base_url } => EmbeddingConfig::Ollama {
            base_url: resolve_env_vars(base_url),
        },
        EmbeddingConfig::Mock => EmbeddingConfig::Mock,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `tutorbench.toml` in the current directory
/// 2. `~/.config/tutorbench/config.toml`
///
/// Environment variable override: `TUTORBENCH_OPENAI_KEY`.
pub fn load_config() -> Result<TutorbenchConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TutorbenchConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("tutorbench.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<TutorbenchConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TutorbenchConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("TUTORBENCH_OPENAI_KEY") {
        config
            .providers
            .entry("openai".into())
            .or_insert(EmbeddingConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                org_id: None,
            });
        if let Some(EmbeddingConfig::OpenAI { api_key, .. }) = config.providers.get_mut("openai") {
            *api_key = key;
        }
    }

    // Resolve env vars in all backend configs
    let resolved: HashMap<String, EmbeddingConfig> = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_embedding_config(v)))
        .collect();
    config.providers = resolved;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("tutorbench"))
}

/// Create a backend instance from its configuration.
pub fn create_provider(
    name: &str,
    config: &EmbeddingConfig,
    model: &str,
) -> Result<Box<dyn EmbeddingProvider>> {
    match config {
        EmbeddingConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Ok(Box::new(OpenAiEmbeddings::with_model(
            api_key,
            base_url.clone(),
            org_id.clone(),
            model,
        ))),
        EmbeddingConfig::Ollama { base_url } => {
            let _ = name;
            Ok(Box::new(OllamaEmbeddings::with_model(base_url, model)))
        }
        EmbeddingConfig::Mock => Ok(Box::new(MockEmbeddings::new())),
    }
}
