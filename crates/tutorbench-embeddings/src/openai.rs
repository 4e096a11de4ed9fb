//! OpenAI embeddings API provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tutorbench_core::model::Embedding;
use tutorbench_core::traits::EmbeddingProvider;

use crate::error::EmbeddingError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "text-embedding-3-small";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// OpenAI-compatible embeddings API provider.
pub struct OpenAiEmbeddings {
    api_key: String,
    base_url: String,
    model: String,
    org_id: Option<String>,
    client: reqwest::Client,
}

impl OpenAiEmbeddings {
    pub fn new(api_key: &str, base_url: Option<String>, org_id: Option<String>) -> Self {
        Self::with_model(api_key, base_url, org_id, DEFAULT_MODEL)
    }

    pub fn with_model(
        api_key: &str,
        base_url: Option<String>,
        org_id: Option<String>,
        model: &str,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.to_string(),
            org_id,
            client,
        }
    }
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiEmbeddingEntry>,
}

#[derive(Deserialize)]
struct OpenAiEmbeddingEntry {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn embed(&self, text: &str) -> anyhow::Result<Embedding> {
        let body = OpenAiRequest {
            model: &self.model,
            input: text,
        };

        let mut req = self
            .client
            .post(format!("{}/v1/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json");

        if let Some(org) = &self.org_id {
            req = req.header("OpenAI-Organization", org);
        }

        let response = req.json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                EmbeddingError::Timeout(DEFAULT_TIMEOUT_SECS)
            } else {
                EmbeddingError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(EmbeddingError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::AuthenticationFailed(body).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let api_response: OpenAiResponse =
            response.json().await.map_err(|e| EmbeddingError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let entry = api_response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::ApiError {
                status: 0,
                message: "response contained no embedding".into(),
            })?;

        Ok(Embedding(entry.embedding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn successful_embedding() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.1, -0.2, 0.3]}],
            "model": "text-embedding-3-small",
            "usage": {"prompt_tokens": 4, "total_tokens": 4}
        });

        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let provider = OpenAiEmbeddings::new("test-key", Some(server.uri()), None);
        let embedding = provider.embed("F = ma").await.unwrap();
        assert_eq!(embedding, Embedding(vec![0.1, -0.2, 0.3]));
    }

    #[tokio::test]
    async fn authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let provider = OpenAiEmbeddings::new("bad-key", Some(server.uri()), None);
        let err = provider.embed("text").await.unwrap_err();
        assert!(err.to_string().contains("authentication failed"));
    }

    #[tokio::test]
    async fn rate_limit_carries_retry_after() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(
                ResponseTemplate::new(429).insert_header("retry-after", "7"),
            )
            .mount(&server)
            .await;

        let provider = OpenAiEmbeddings::new("key", Some(server.uri()), None);
        let err = provider.embed("text").await.unwrap_err();
        assert!(err.to_string().contains("retry after 7000ms"));
    }

    #[tokio::test]
    async fn server_error_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let provider = OpenAiEmbeddings::new("key", Some(server.uri()), None);
        let err = provider.embed("text").await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn empty_data_is_an_error() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "object": "list",
            "data": [],
            "model": "text-embedding-3-small",
            "usage": {"prompt_tokens": 0, "total_tokens": 0}
        });

        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let provider = OpenAiEmbeddings::new("key", Some(server.uri()), None);
        let err = provider.embed("text").await.unwrap_err();
        assert!(err.to_string().contains("no embedding"));
    }
}
