use std::sync::Arc;
use std::time::Duration;

use docsynth_core::{with_deadline, DocsynthError, Llm, LlmRequest, Runnable};
use docsynth_prompt::brd::GENERATION_SYSTEM_MESSAGE;
use futures::future::join_all;

use crate::{CandidateSet, ConsistencyEvaluator, ConsistencyReport};

pub const DEFAULT_TEMPERATURE_STEP: f32 = 0.1;

/// Fans one prompt out over several sampling temperatures and votes on the results.
pub struct SamplingGenerator {
    llm: Arc<dyn Llm>,
    evaluator: ConsistencyEvaluator,
    system_message: String,
    temperature_step: f32,
    deadline: Option<Duration>,
}

impl SamplingGenerator {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self {
            llm,
            evaluator: ConsistencyEvaluator::new(),
            system_message: GENERATION_SYSTEM_MESSAGE.to_string(),
            temperature_step: DEFAULT_TEMPERATURE_STEP,
            deadline: None,
        }
    }

    pub fn with_temperature_step(mut self, step: f32) -> Self {
        self.temperature_step = step;
        self
    }

    pub fn with_system_message(mut self, message: impl Into<String>) -> Self {
        self.system_message = message.into();
        self
    }

    /// Per-call limit applied to every backend request.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// `base + i * step` for each sample, rounded to three decimals.
    pub fn temperatures(&self, base_temperature: f32, sample_count: usize) -> Vec<f32> {
        (0..sample_count)
            .map(|i| {
                let raw = base_temperature + i as f32 * self.temperature_step;
                (raw * 1000.0).round() / 1000.0
            })
            .collect()
    }

    pub async fn sample(
        &self,
        prompt: &str,
        base_temperature: f32,
        sample_count: usize,
    ) -> Result<ConsistencyReport, DocsynthError> {
        if sample_count == 0 {
            return Err(DocsynthError::InvalidConfig(
                "sample_count must be at least 1".to_string(),
            ));
        }

        let temperatures = self.temperatures(base_temperature, sample_count);
        let calls = temperatures.iter().map(|&temperature| {
            let request =
                LlmRequest::chat(self.system_message.as_str(), prompt).with_temperature(temperature);
            async move {
                let result = with_deadline(self.deadline, self.llm.invoke(request)).await;
                (temperature, result)
            }
        });
        let outcomes = join_all(calls).await;

        let mut survivors = Vec::with_capacity(sample_count);
        for (temperature, outcome) in outcomes {
            match outcome {
                Ok(response) if !response.content.trim().is_empty() => {
                    survivors.push(response.content)
                }
                Ok(_) => {
                    tracing::warn!(temperature, "sample returned empty content");
                }
                Err(error) => {
                    tracing::warn!(temperature, error = %error, "sample failed");
                }
            }
        }

        tracing::info!(
            attempted = sample_count,
            succeeded = survivors.len(),
            "sampling finished"
        );
        let candidates = CandidateSet::new(survivors).ok_or(DocsynthError::GenerationExhausted {
            attempted: sample_count,
        })?;
        Ok(self.evaluator.evaluate(candidates))
    }
}
