use crate::{AssertError, RetryPolicy};
use std::future::Future;
use std::time::Duration;
use tokio::time::delay_for;
use tracing::{debug, trace, warn};

/// Async counterpart of `expect_with_retry`. `predicate` is called once per attempt and the
/// returned future awaited; the retry action and the wait follow the same rules.
pub async fn expect_with_retry_async<P, F>(
    mut predicate: P,
    mut retry_action: Option<&mut (dyn FnMut() + Send)>,
    max_retries: usize,
    retry_interval: Duration,
) -> Result<(), AssertError>
where
    P: FnMut() -> F,
    F: Future<Output = bool>,
{
    for attempt in 1..=max_retries {
        if predicate().await {
            debug!(attempt, "predicate satisfied");
            return Ok(());
        }
        if attempt == max_retries {
            break;
        }

        debug!(
            attempt,
            max_retries,
            ?retry_interval,
            "predicate not satisfied, retrying"
        );
        if let Some(action) = retry_action.as_deref_mut() {
            trace!(attempt, "running retry action");
            action();
        }
        delay_for(retry_interval).await;
    }

    warn!(max_retries, "predicate never became true");
    Err(AssertError::RetriesExhausted {
        attempts: max_retries,
    })
}

impl RetryPolicy {
    pub async fn expect_async<P, F>(&self, predicate: P) -> Result<(), AssertError>
    where
        P: FnMut() -> F,
        F: Future<Output = bool>,
    {
        expect_with_retry_async(predicate, None, self.max_retries, self.retry_interval).await
    }
}
