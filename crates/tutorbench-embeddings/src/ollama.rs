//! Ollama (local) embeddings provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tutorbench_core::model::Embedding;
use tutorbench_core::traits::EmbeddingProvider;

use crate::error::EmbeddingError;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "nomic-embed-text";
const DEFAULT_TIMEOUT_SECS: u64 = 300; // Local inference is slower

/// Ollama local embeddings provider.
pub struct OllamaEmbeddings {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaEmbeddings {
    pub fn new(base_url: &str) -> Self {
        Self::with_model(base_url, DEFAULT_MODEL)
    }

    pub fn with_model(base_url: &str, model: &str) -> Self {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base.to_string(),
            model: model.to_string(),
            client,
        }
    }
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct OllamaResponse {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddings {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn embed(&self, text: &str) -> anyhow::Result<Embedding> {
        let body = OllamaRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else if e.is_connect() {
                    EmbeddingError::NetworkError(format!(
                        "Ollama not reachable at {}. Is it running? Start with: ollama serve",
                        self.base_url
                    ))
                } else {
                    EmbeddingError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(EmbeddingError::ModelNotFound(format!(
                "Model '{}' not found locally. Pull it with: ollama pull {}",
                self.model, self.model
            ))
            .into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let api_response: OllamaResponse =
            response.json().await.map_err(|e| EmbeddingError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        if api_response.embedding.is_empty() {
            return Err(EmbeddingError::ApiError {
                status: 0,
                message: "response contained an empty embedding".into(),
            }
            .into());
        }

        Ok(Embedding(api_response.embedding))
    }
}
