mod deadline;
mod document;
mod embedding;
mod error;
mod llm;
mod retriever;
mod retry;
mod runnable;
mod sink;
mod tool;
mod vector_store;

pub use deadline::with_deadline;
pub use document::Document;
pub use embedding::Embedding;
pub use error::{DocsynthError, EmbeddingError, StoreError};
pub use llm::{Llm, LlmRequest, LlmResponse, Message, Role};
pub use retriever::ContextRetriever;
pub use retry::{is_retryable, Retrying};
pub use runnable::Runnable;
pub use sink::DocumentSink;
pub use tool::{SearchTool, ToolError};
pub use vector_store::{SearchResult, VectorStore};

pub type Value = serde_json::Value;
