use std::sync::Arc;

use async_trait::async_trait;

use crate::DocsynthError;

#[async_trait]
pub trait Runnable<Input: Send + 'static, Output: Send + 'static>: Send + Sync {
    async fn invoke(&self, input: Input) -> Result<Output, DocsynthError>;
}

#[async_trait]
impl<Input, Output, R> Runnable<Input, Output> for Arc<R>
where
    Input: Send + 'static,
    Output: Send + 'static,
    R: Runnable<Input, Output> + ?Sized,
{
    async fn invoke(&self, input: Input) -> Result<Output, DocsynthError> {
        (**self).invoke(input).await
    }
}
