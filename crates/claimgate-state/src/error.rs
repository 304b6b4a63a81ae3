//! Error types for claimgate-state

use thiserror::Error;

/// Errors that can occur in the eval persistence layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// Eval run not found
    #[error("eval run not found: {run_id}")]
    RunNotFound { run_id: String },

    /// Operation attempted against a run in the wrong lifecycle state
    #[error("eval run {run_id} is {status}, expected {expected}")]
    InvalidRunState {
        run_id: String,
        status: String,
        expected: String,
    },

    /// Serialization error
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Backend-specific failure (connection, query, transaction)
    #[error("storage backend failed: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
