//! Session error types.
//!
//! Typed failures for the interactive flows, so callers can tell an
//! aborting input failure apart from a bounded-validation failure without
//! string matching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that end or reject part of a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The source document could not be read.
    #[error("failed to read document {path}: {source}")]
    DocumentUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The menu code did not match any known action. Aborts the run; the
    /// menu does not re-prompt.
    #[error("unrecognized choice '{0}' (expected 1 or 2)")]
    UnrecognizedChoice(String),

    /// A personality answer stayed below the word minimum for every
    /// allowed attempt.
    #[error("answer below the {min_words}-word minimum after {attempts} attempts")]
    AnswerTooShort { attempts: u32, min_words: usize },

    /// The prompt source ran out of input before the flow completed.
    #[error("input closed before the flow completed")]
    InputClosed,

    /// The question bank has no entries for the requested subject.
    #[error("question bank '{bank}' has no entries for subject '{subject}'")]
    SubjectNotInBank { bank: String, subject: String },
}
