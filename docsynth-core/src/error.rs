use std::{error::Error as StdError, fmt, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocsynthError {
    #[error("LLM provider failed: {0}")]
    LlmProvider(String),
    #[error("Temperature {0} is outside the backend range")]
    InvalidTemperature(f32),
    #[error("All {attempted} generation samples failed")]
    GenerationExhausted { attempted: usize },
    #[error("Context retrieval failed: {0}")]
    Retrieval(String),
    #[error("Tool call failed for '{tool_name}': {reason}")]
    ToolCallFailed { tool_name: String, reason: String },
    #[error("Persisting document failed: {0}")]
    Persistence(String),
    #[error("No document content available")]
    EmptyContent,
    #[error("Deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),
    #[error("Max retries ({max}) exceeded")]
    MaxRetriesExceeded { max: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<EmbeddingError> for DocsynthError {
    fn from(err: EmbeddingError) -> Self {
        DocsynthError::Retrieval(err.to_string())
    }
}

impl From<StoreError> for DocsynthError {
    fn from(err: StoreError) -> Self {
        DocsynthError::Retrieval(err.to_string())
    }
}

#[derive(Debug)]
pub enum EmbeddingError {
    InvalidResponse(String),
    Provider(String),
}

impl fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingError::InvalidResponse(message) => {
                write!(f, "Embedding invalid response: {message}")
            }
            EmbeddingError::Provider(message) => write!(f, "Embedding provider error: {message}"),
        }
    }
}

impl StdError for EmbeddingError {}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("invalid document id: {0}")]
    InvalidId(String),
    #[error("document '{0}' has no embedding")]
    MissingEmbedding(String),
}
