use crate::AssertError;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace, warn};

pub const DEFAULT_MAX_RETRIES: usize = 10;
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// How many times to evaluate a predicate, and how long to wait between evaluations.
///
/// Built the same way links are, starting from the defaults and overriding fields:
///
/// `RetryPolicy::new().max_retries(5).retry_interval(Duration::from_millis(100))`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub retry_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        RetryPolicy::default()
    }

    pub fn max_retries(self, max_retries: usize) -> Self {
        RetryPolicy {
            max_retries,
            ..self
        }
    }

    pub fn retry_interval(self, retry_interval: Duration) -> Self {
        RetryPolicy {
            retry_interval,
            ..self
        }
    }

    pub fn expect<P>(&self, predicate: P) -> Result<(), AssertError>
    where
        P: FnMut() -> bool,
    {
        expect_with_retry(predicate, None, self.max_retries, self.retry_interval)
    }

    pub fn expect_with_action<P, A>(
        &self,
        predicate: P,
        mut retry_action: A,
    ) -> Result<(), AssertError>
    where
        P: FnMut() -> bool,
        A: FnMut(),
    {
        expect_with_retry(
            predicate,
            Some(&mut retry_action),
            self.max_retries,
            self.retry_interval,
        )
    }
}

/// Evaluates `predicate` up to `max_retries` times, returning as soon as it holds.
///
/// Between two failed evaluations `retry_action` runs (if given) and the calling thread sleeps
/// for `retry_interval`. Neither happens before the first evaluation or after the last one.
/// If the predicate never holds, fails with `AssertError::RetriesExhausted`.
pub fn expect_with_retry<P>(
    mut predicate: P,
    mut retry_action: Option<&mut dyn FnMut()>,
    max_retries: usize,
    retry_interval: Duration,
) -> Result<(), AssertError>
where
    P: FnMut() -> bool,
{
    for attempt in 1..=max_retries {
        if predicate() {
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
        thread::sleep(retry_interval);
    }

    warn!(max_retries, "predicate never became true");
    Err(AssertError::RetriesExhausted {
        attempts: max_retries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssertErrorKind;
    use std::time::Instant;

    const NO_WAIT: Duration = Duration::from_secs(0);

    #[test]
    fn predicate_succeeds_within_retries() -> Result<(), AssertError> {
        let mut calls = 0;
        expect_with_retry(
            || {
                calls += 1;
                calls > 2
            },
            None,
            5,
            NO_WAIT,
        )?;
        assert_eq!(calls, 3);
        Ok(())
    }

    #[test]
    fn predicate_succeeds_on_last_attempt() -> Result<(), AssertError> {
        for n in 1..=6 {
            let mut calls = 0;
            let mut actions = 0;
            expect_with_retry(
                || {
                    calls += 1;
                    calls == n
                },
                Some(&mut || actions += 1),
                n,
                NO_WAIT,
            )?;
            assert_eq!(calls, n);
            assert_eq!(actions, n - 1);
        }
        Ok(())
    }

    #[test]
    fn predicate_never_succeeds() {
        let mut calls = 0;
        let mut actions = 0;
        let err = expect_with_retry(
            || {
                calls += 1;
                false
            },
            Some(&mut || actions += 1),
            3,
            NO_WAIT,
        )
        .unwrap_err();

        assert_eq!(err.kind(), AssertErrorKind::UnexpectedBehavior);
        match err {
            AssertError::RetriesExhausted { attempts } => assert_eq!(attempts, 3),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(calls, 3);
        assert_eq!(actions, 2);
    }

    #[test]
    fn retry_action_not_called_when_first_attempt_succeeds() -> Result<(), AssertError> {
        let mut action_called = false;
        expect_with_retry(|| true, Some(&mut || action_called = true), 5, NO_WAIT)?;
        assert!(!action_called, "retry_action called");
        Ok(())
    }

    #[test]
    fn retry_action_not_called_with_single_attempt() {
        let mut action_called = false;
        let result = expect_with_retry(|| false, Some(&mut || action_called = true), 1, NO_WAIT);
        assert!(result.is_err());
        assert!(!action_called, "retry_action called");
    }

    #[test]
    fn retry_action_called_between_attempts() {
        let mut action_called = false;
        let result = expect_with_retry(|| false, Some(&mut || action_called = true), 2, NO_WAIT);
        assert!(result.is_err());
        assert!(action_called, "retry_action not called");
    }

    #[test]
    fn zero_retries_never_evaluates() {
        let mut calls = 0;
        let result = expect_with_retry(
            || {
                calls += 1;
                true
            },
            None,
            0,
            NO_WAIT,
        );
        match result {
            Err(AssertError::RetriesExhausted { attempts: 0 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn waits_only_between_attempts() {
        let interval = Duration::from_millis(20);
        let start = Instant::now();
        let result = expect_with_retry(|| false, None, 3, interval);
        assert!(result.is_err());
        assert!(start.elapsed() >= interval * 2);

        // A first-attempt success never sleeps.
        let start = Instant::now();
        assert!(expect_with_retry(|| true, None, 3, Duration::from_secs(5)).is_ok());
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn default_policy() {
        let policy = RetryPolicy::new();
        assert_eq!(policy.max_retries, 10);
        assert_eq!(policy.retry_interval, Duration::from_secs(1));

        let policy = policy.max_retries(4).retry_interval(NO_WAIT);
        assert_eq!(
            policy,
            RetryPolicy {
                max_retries: 4,
                retry_interval: NO_WAIT
            }
        );
    }

    #[test]
    fn policy_runs_action_between_attempts() {
        let mut calls = 0;
        let mut actions = 0;
        let policy = RetryPolicy::new().max_retries(4).retry_interval(NO_WAIT);
        let result = policy.expect_with_action(
            || {
                calls += 1;
                false
            },
            || actions += 1,
        );
        assert!(result.is_err());
        assert_eq!(calls, 4);
        assert_eq!(actions, 3);
    }

    #[test]
    fn policy_expect() -> Result<(), AssertError> {
        let mut calls = 0;
        RetryPolicy::new().retry_interval(NO_WAIT).expect(|| {
            calls += 1;
            calls == 10
        })?;
        assert_eq!(calls, 10);
        Ok(())
    }
}
