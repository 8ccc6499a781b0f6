use std::path::PathBuf;

use docsynth_core::{DocsynthError, EmbeddingError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("invalid splitter config: {0}")]
    Splitter(#[from] SplitterConfigError),
}

impl From<RetrievalError> for DocsynthError {
    fn from(err: RetrievalError) -> Self {
        DocsynthError::Retrieval(err.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitterConfigError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
    #[error("overlap {overlap} must be smaller than chunk size {chunk_size}")]
    OverlapTooLarge { chunk_size: usize, overlap: usize },
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file type '{extension}' for {path}")]
    Unsupported { path: PathBuf, extension: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}
