use std::time::Duration;

use docsynth_core::{with_deadline, DocsynthError};

#[tokio::test]
async fn deadline_passes_through_fast_results() {
    let value = with_deadline(Some(Duration::from_secs(1)), async { Ok::<_, DocsynthError>(7) })
        .await
        .unwrap();
    assert_eq!(value, 7);
}

#[tokio::test(start_paused = true)]
async fn deadline_expires_slow_futures() {
    let err = with_deadline(Some(Duration::from_millis(50)), async {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok::<_, DocsynthError>(())
    })
    .await
    .unwrap_err();

    assert!(matches!(err, DocsynthError::DeadlineExceeded(d) if d == Duration::from_millis(50)));
}

#[tokio::test]
async fn no_deadline_keeps_inner_error() {
    let err = with_deadline(None, async {
        Err::<(), _>(DocsynthError::LlmProvider("boom".to_string()))
    })
    .await
    .unwrap_err();
    assert!(matches!(err, DocsynthError::LlmProvider(_)));
}
