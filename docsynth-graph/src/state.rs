use serde::{Deserialize, Serialize};

/// The record threaded through every node of one run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub input_text: String,
    /// `None` until a document exists, or after the last step failed.
    pub output_content: Option<String>,
    pub iteration_count: u32,
    pub retrieved_context: Option<String>,
    pub persisted_path: Option<String>,
    /// Reviewer notes for a human-in-the-loop pass; no node reads it yet.
    pub feedback: Option<String>,
}

impl WorkflowState {
    pub fn new(input_text: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            ..Self::default()
        }
    }
}
