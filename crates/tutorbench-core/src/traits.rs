//! Capability traits for external collaborators.
//!
//! Embedding inference, summarization, and document loading are expensive
//! or environment-dependent, so they sit behind traits implemented in
//! `tutorbench-embeddings` and the CLI, and faked in tests.

use std::path::Path;

use async_trait::async_trait;

use crate::error::SessionError;
use crate::model::Embedding;

// ---------------------------------------------------------------------------
// Embedding provider trait
// ---------------------------------------------------------------------------

/// Trait for embedding backends that map text to fixed-dimension vectors.
///
/// A provider is pure for a fixed model: identical text yields an identical
/// vector. Calls may be slow (remote or local inference), hence async.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Human-readable provider name (e.g. "ollama").
    fn name(&self) -> &str;

    /// Identifier of the embedding model in use.
    fn model(&self) -> &str;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> anyhow::Result<Embedding>;

    /// Embed several texts, one call at a time.
    async fn embed_all(&self, texts: &[&str]) -> anyhow::Result<Vec<Embedding>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Summarizer trait
// ---------------------------------------------------------------------------

/// Extractive summarization: `count` sentences from `text`, returned in
/// document order.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, count: usize) -> anyhow::Result<Vec<String>>;
}

// ---------------------------------------------------------------------------
// Document source trait
// ---------------------------------------------------------------------------

/// Loads the full text of a source document.
pub trait DocumentSource: Send + Sync {
    fn load(&self, path: &Path) -> Result<String, SessionError>;
}

/// Reads plain-text documents from the filesystem.
pub struct FileSource;

impl DocumentSource for FileSource {
    fn load(&self, path: &Path) -> Result<String, SessionError> {
        std::fs::read_to_string(path).map_err(|source| SessionError::DocumentUnreadable {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Answer extractor trait
// ---------------------------------------------------------------------------

/// Derives the expected answer for a quiz item from its source sentence.
pub trait AnswerExtractor: Send + Sync {
    /// `None` when the sentence yields no usable answer.
    fn expected_answer(&self, sentence: &str) -> Option<String>;
}

/// First whitespace-delimited token of the trimmed sentence.
///
/// A crude placeholder rather than real answer extraction. Grading matches
/// against this exact token, so swapping the extractor changes what counts
/// as a correct answer.
pub struct FirstTokenExtractor;

impl AnswerExtractor for FirstTokenExtractor {
    fn expected_answer(&self, sentence: &str) -> Option<String> {
        sentence
            .trim()
            .split_whitespace()
            .next()
            .map(|t| t.to_string())
    }
}
