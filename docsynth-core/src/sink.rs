use async_trait::async_trait;

use crate::DocsynthError;

/// Stores a finished document and returns where it went.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn save(&self, content: &str) -> Result<String, DocsynthError>;
}
