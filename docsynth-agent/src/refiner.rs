use std::sync::Arc;
use std::time::Duration;

use docsynth_core::{with_deadline, DocsynthError, Llm, LlmRequest, Runnable};
use docsynth_prompt::brd::{NOTHING_TO_REFINE, REFINE_SYSTEM_MESSAGE};
use docsynth_prompt::refinement_prompt;

/// One critique-and-rewrite pass over a draft.
pub struct RefinementStep {
    llm: Arc<dyn Llm>,
    temperature: Option<f32>,
    deadline: Option<Duration>,
}

impl RefinementStep {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self {
            llm,
            temperature: None,
            deadline: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Returns the backend's rewrite verbatim. A blank draft short-circuits to
    /// [`NOTHING_TO_REFINE`] without calling the backend.
    pub async fn refine(
        &self,
        original_input: &str,
        current_output: &str,
    ) -> Result<String, DocsynthError> {
        if current_output.trim().is_empty() {
            return Ok(NOTHING_TO_REFINE.to_string());
        }

        let user = refinement_prompt(original_input, current_output)?;
        let mut request = LlmRequest::chat(REFINE_SYSTEM_MESSAGE, user);
        request.temperature = self.temperature;

        let response = with_deadline(self.deadline, self.llm.invoke(request)).await?;
        Ok(response.content)
    }
}
