use std::time::Duration;

use crate::{with_deadline, DocsynthError, Runnable};

/// Retries transient failures of the wrapped runnable with exponential backoff.
///
/// `max_attempts = 1` performs a single call and returns its error unchanged.
/// An attempt deadline bounds each call separately, so a timed-out attempt is retried.
pub struct Retrying<R> {
    runnable: R,
    max_attempts: usize,
    backoff: Duration,
    attempt_deadline: Option<Duration>,
}

impl<R> Retrying<R> {
    pub fn new(runnable: R, max_attempts: usize) -> Self {
        Self {
            runnable,
            max_attempts,
            backoff: Duration::from_millis(200),
            attempt_deadline: None,
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_attempt_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.attempt_deadline = deadline;
        self
    }
}

pub fn is_retryable(error: &DocsynthError) -> bool {
    matches!(
        error,
        DocsynthError::LlmProvider(_) | DocsynthError::DeadlineExceeded(_)
    )
}

#[async_trait::async_trait]
impl<Input, Output, R> Runnable<Input, Output> for Retrying<R>
where
    Input: Send + Sync + Clone + 'static,
    Output: Send + 'static,
    R: Runnable<Input, Output>,
{
    async fn invoke(&self, input: Input) -> Result<Output, DocsynthError> {
        if self.max_attempts == 0 {
            return Err(DocsynthError::MaxRetriesExceeded { max: 0 });
        }

        let mut delay = self.backoff;
        for attempt in 1..=self.max_attempts {
            let call = self.runnable.invoke(input.clone());
            match with_deadline(self.attempt_deadline, call).await {
                Ok(output) => return Ok(output),
                Err(error) => {
                    if !is_retryable(&error) || self.max_attempts == 1 {
                        return Err(error);
                    }
                    if attempt == self.max_attempts {
                        return Err(DocsynthError::MaxRetriesExceeded {
                            max: self.max_attempts,
                        });
                    }
                    tracing::debug!(attempt, error = %error, "retrying after transient failure");
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
            }
        }

        Err(DocsynthError::MaxRetriesExceeded {
            max: self.max_attempts,
        })
    }
}
