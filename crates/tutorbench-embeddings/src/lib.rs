//! tutorbench-embeddings — Embedding backends for tutorbench.
//!
//! Implements the `EmbeddingProvider` trait for the OpenAI and Ollama
//! embeddings APIs, plus a deterministic mock for tests and offline runs.

pub mod config;
pub mod error;
pub mod mock;
pub mod ollama;
pub mod openai;

pub use config::{create_provider, load_config, EmbeddingConfig, TutorbenchConfig};
pub use error::EmbeddingError;
