use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use docsynth_core::{DocsynthError, Retrying, Runnable};

struct Flaky {
    failures_before_success: usize,
    attempts: Arc<AtomicUsize>,
}

impl Flaky {
    fn new(failures_before_success: usize) -> Self {
        Self {
            failures_before_success,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn attempts_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.attempts)
    }
}

struct MisconfiguredBackend {
    attempts: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl Runnable<String, String> for Flaky {
    async fn invoke(&self, input: String) -> Result<String, DocsynthError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures_before_success {
            return Err(DocsynthError::LlmProvider("transient".to_string()));
        }

        Ok(format!("ok:{input}"))
    }
}

#[async_trait::async_trait]
impl Runnable<String, String> for MisconfiguredBackend {
    async fn invoke(&self, _input: String) -> Result<String, DocsynthError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(DocsynthError::InvalidConfig("missing api key".to_string()))
    }
}

fn retrying<R>(runnable: R, attempts: usize) -> Retrying<R> {
    Retrying::new(runnable, attempts).with_backoff(Duration::ZERO)
}

#[tokio::test]
async fn retries_until_success() {
    let flaky = Flaky::new(2);
    let attempts = flaky.attempts_counter();
    let output = retrying(flaky, 3).invoke("ping".to_string()).await.unwrap();

    assert_eq!(output, "ok:ping".to_string());
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn returns_max_retries_exceeded() {
    let flaky = Flaky::new(5);
    let attempts = flaky.attempts_counter();
    let err = retrying(flaky, 2)
        .invoke("ping".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, DocsynthError::MaxRetriesExceeded { max: 2 }));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn single_attempt_returns_original_error() {
    let flaky = Flaky::new(1);
    let attempts = flaky.attempts_counter();
    let err = retrying(flaky, 1)
        .invoke("ping".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, DocsynthError::LlmProvider(_)));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn zero_attempts_never_calls_inner() {
    let flaky = Flaky::new(1);
    let attempts = flaky.attempts_counter();
    let err = retrying(flaky, 0)
        .invoke("ping".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, DocsynthError::MaxRetriesExceeded { max: 0 }));
    assert_eq!(attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_retryable_error_fails_fast() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let backend = MisconfiguredBackend {
        attempts: Arc::clone(&attempts),
    };
    let err = retrying(backend, 3)
        .invoke("ping".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, DocsynthError::InvalidConfig(_)));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

struct StallsOnce {
    attempts: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl Runnable<String, String> for StallsOnce {
    async fn invoke(&self, input: String) -> Result<String, DocsynthError> {
        if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        Ok(format!("ok:{input}"))
    }
}

#[tokio::test(start_paused = true)]
async fn timed_out_attempt_is_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let backend = StallsOnce {
        attempts: Arc::clone(&attempts),
    };
    let output = retrying(backend, 3)
        .with_attempt_deadline(Some(Duration::from_secs(5)))
        .invoke("ping".to_string())
        .await
        .unwrap();

    assert_eq!(output, "ok:ping");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn attempt_deadline_without_retry_surfaces_timeout() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let backend = StallsOnce {
        attempts: Arc::clone(&attempts),
    };
    let err = retrying(backend, 1)
        .with_attempt_deadline(Some(Duration::from_secs(5)))
        .invoke("ping".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, DocsynthError::DeadlineExceeded(_)));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}
