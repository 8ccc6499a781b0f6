use docsynth_core::{SearchTool, ToolError};

/// Stand-in when no search backend is configured. Every call fails, so augmentation
/// passes the document through unchanged.
#[derive(Clone, Debug, Default)]
pub struct UnavailableSearch;

#[async_trait::async_trait]
impl SearchTool for UnavailableSearch {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn search(&self, _query: &str) -> Result<String, ToolError> {
        Err(ToolError::ExecutionFailed(
            "no search backend configured".to_string(),
        ))
    }
}
