use std::future::Future;
use std::time::Duration;

use crate::DocsynthError;

/// Runs `future` under an optional deadline.
///
/// `None` waits indefinitely. Expiry drops the future and yields
/// [`DocsynthError::DeadlineExceeded`].
pub async fn with_deadline<F, T>(deadline: Option<Duration>, future: F) -> Result<T, DocsynthError>
where
    F: Future<Output = Result<T, DocsynthError>>,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, future)
            .await
            .map_err(|_| DocsynthError::DeadlineExceeded(limit))?,
        None => future.await,
    }
}
