use std::time::Duration;

use docsynth_core::DocsynthError;
use docsynth_prompt::brd::{DEFAULT_AUGMENTATION_QUERY, DEFAULT_RETRIEVAL_QUESTION};

pub const DEFAULT_MAX_ITERATIONS: u32 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct WorkflowConfig {
    /// Successful refinement passes before the document is persisted.
    pub max_iterations: u32,
    pub base_temperature: f32,
    pub temperature_step: f32,
    pub sample_count: usize,
    /// Cap on SelfRefine executions, failed ones included. Defaults to
    /// `2 * max_iterations + 1`.
    pub max_refine_attempts: Option<u32>,
    /// Deadline for each individual backend call.
    pub backend_timeout: Option<Duration>,
    /// Attempts per generation call; 1 disables retrying.
    pub retry_attempts: usize,
    pub retrieval_question: String,
    pub augmentation_query: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            base_temperature: 0.3,
            temperature_step: 0.1,
            sample_count: 2,
            max_refine_attempts: None,
            backend_timeout: None,
            retry_attempts: 1,
            retrieval_question: DEFAULT_RETRIEVAL_QUESTION.to_string(),
            augmentation_query: DEFAULT_AUGMENTATION_QUERY.to_string(),
        }
    }
}

impl WorkflowConfig {
    pub fn merge(&self, overrides: &WorkflowOptions) -> Self {
        Self {
            max_iterations: overrides.max_iterations.unwrap_or(self.max_iterations),
            base_temperature: overrides.base_temperature.unwrap_or(self.base_temperature),
            temperature_step: overrides.temperature_step.unwrap_or(self.temperature_step),
            sample_count: overrides.sample_count.unwrap_or(self.sample_count),
            max_refine_attempts: overrides.max_refine_attempts.or(self.max_refine_attempts),
            backend_timeout: overrides.backend_timeout.or(self.backend_timeout),
            retry_attempts: self.retry_attempts,
            retrieval_question: overrides
                .retrieval_question
                .clone()
                .unwrap_or_else(|| self.retrieval_question.clone()),
            augmentation_query: overrides
                .augmentation_query
                .clone()
                .unwrap_or_else(|| self.augmentation_query.clone()),
        }
    }

    pub fn refine_attempt_limit(&self) -> u32 {
        self.max_refine_attempts
            .unwrap_or_else(|| self.max_iterations.saturating_mul(2).saturating_add(1))
    }

    pub fn validate(&self) -> Result<(), DocsynthError> {
        let invalid = |msg: String| Err(DocsynthError::InvalidConfig(msg));

        if self.max_iterations == 0 {
            return invalid("max_iterations must be at least 1".to_string());
        }
        if self.sample_count == 0 {
            return invalid("sample_count must be at least 1".to_string());
        }
        if !self.base_temperature.is_finite() || self.base_temperature < 0.0 {
            return invalid(format!(
                "base_temperature must be a non-negative number, got {}",
                self.base_temperature
            ));
        }
        if !self.temperature_step.is_finite() || self.temperature_step < 0.0 {
            return invalid(format!(
                "temperature_step must be a non-negative number, got {}",
                self.temperature_step
            ));
        }
        if self.max_refine_attempts == Some(0) {
            return invalid("max_refine_attempts must be at least 1".to_string());
        }
        if self.retry_attempts == 0 {
            return invalid("retry_attempts must be at least 1".to_string());
        }
        if self.backend_timeout == Some(Duration::ZERO) {
            return invalid("backend_timeout must be positive".to_string());
        }
        Ok(())
    }
}

/// Per-run overrides layered over a [`WorkflowConfig`].
#[derive(Clone, Debug, Default)]
pub struct WorkflowOptions {
    pub max_iterations: Option<u32>,
    pub base_temperature: Option<f32>,
    pub temperature_step: Option<f32>,
    pub sample_count: Option<usize>,
    pub max_refine_attempts: Option<u32>,
    pub backend_timeout: Option<Duration>,
    pub retrieval_question: Option<String>,
    pub augmentation_query: Option<String>,
}
