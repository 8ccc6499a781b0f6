use async_trait::async_trait;

use crate::DocsynthError;

/// Answers a question with supporting context drawn from `documents`.
///
/// Implementations return an empty string when nothing clears their relevance threshold.
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    async fn query(&self, question: &str, documents: &[String]) -> Result<String, DocsynthError>;
}
