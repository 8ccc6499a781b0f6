use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
    #[error("no results for query '{0}'")]
    NoResults(String),
}

/// External augmentation source, e.g. a web search API.
#[async_trait::async_trait]
pub trait SearchTool: Send + Sync {
    fn name(&self) -> &str;
    async fn search(&self, query: &str) -> Result<String, ToolError>;
}
