use std::time::Duration;

use docsynth_core::{DocsynthError, EmbeddingError, StoreError, ToolError};

#[test]
fn error_display_for_generation_exhausted() {
    let err = DocsynthError::GenerationExhausted { attempted: 3 };
    assert_eq!(format!("{err}"), "All 3 generation samples failed");
}

#[test]
fn error_display_for_llm_provider() {
    let err = DocsynthError::LlmProvider("rate limited".to_string());
    assert_eq!(format!("{err}"), "LLM provider failed: rate limited");
}

#[test]
fn error_display_for_tool_call_failed() {
    let err = DocsynthError::ToolCallFailed {
        tool_name: "tavily".to_string(),
        reason: "timeout".to_string(),
    };
    assert_eq!(format!("{err}"), "Tool call failed for 'tavily': timeout");
}

#[test]
fn error_display_for_deadline() {
    let err = DocsynthError::DeadlineExceeded(Duration::from_secs(5));
    assert_eq!(format!("{err}"), "Deadline exceeded after 5s");
}

#[test]
fn store_and_embedding_errors_convert_to_retrieval() {
    let store: DocsynthError = StoreError::DimensionMismatch {
        expected: 4,
        got: 3,
    }
    .into();
    assert!(matches!(store, DocsynthError::Retrieval(ref msg) if msg.contains("expected 4")));

    let embedding: DocsynthError = EmbeddingError::Provider("down".to_string()).into();
    assert_eq!(
        format!("{embedding}"),
        "Context retrieval failed: Embedding provider error: down"
    );
}

#[test]
fn tool_error_display() {
    let err = ToolError::NoResults("sap".to_string());
    assert_eq!(format!("{err}"), "no results for query 'sap'");
}
