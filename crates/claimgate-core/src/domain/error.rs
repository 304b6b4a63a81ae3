//! Domain-level error taxonomy for Claimgate.

/// Claimgate domain errors.
#[derive(Debug, thiserror::Error)]
pub enum ClaimgateError {
    #[error("prompt rendering failed: {0}")]
    PromptRender(String),

    #[error("model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("invalid test case input: {0}")]
    InvalidInput(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] claimgate_state::StorageError),
}

/// Result type for Claimgate domain operations.
pub type Result<T> = std::result::Result<T, ClaimgateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClaimgateError::PromptRender("template not found".to_string());
        assert!(err.to_string().contains("prompt rendering failed"));

        let err = ClaimgateError::ModelInvocation("429 too many requests".to_string());
        assert!(err.to_string().contains("model invocation failed"));
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_storage_error_converts() {
        let storage = claimgate_state::StorageError::Backend("connection refused".to_string());
        let err: ClaimgateError = storage.into();
        assert!(err.to_string().contains("storage error"));
    }
}
