//! Quiz and persistence error types.
//!
//! `QuizError` covers protocol misuse against the store (evaluating without a
//! task, generating with an impossible size). `PersistError` covers the state
//! sink. Startup paths wrap both in `anyhow` with file context.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::UserId;

/// Errors returned by quiz operations on the user store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// No profile exists for this user; `ensure_user` was never called.
    #[error("unknown user {0}")]
    UnknownUser(UserId),

    /// The user has no outstanding task to evaluate.
    #[error("user {0} has no outstanding task")]
    NoOutstandingTask(UserId),

    /// The requested task size cannot be drawn from the dictionary.
    #[error("task size {size} is out of range for a dictionary of {dictionary_size} words")]
    InvalidTaskSize { size: usize, dictionary_size: usize },

    /// The user has not answered anything yet.
    #[error("user {0} has no answer history")]
    EmptyHistory(UserId),

    /// The word list contained no entries.
    #[error("dictionary is empty")]
    EmptyDictionary,
}

/// Errors that can occur while reading or writing persisted user state.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the state file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be serialized.
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The state file exists but does not contain valid state.
    #[error("malformed state file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The blocking write task panicked or was cancelled.
    #[error("persistence task failed: {0}")]
    TaskJoin(String),
}

impl PersistError {
    /// Returns `true` if the sink holds data that could not be decoded.
    pub fn is_malformed(&self) -> bool {
        matches!(self, PersistError::Malformed { .. })
    }
}
