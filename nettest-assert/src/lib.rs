/// Errors raised when a device never reaches the expected state, or fails in a way the test did
/// not ask for. Both kinds are hard failures; nothing in this crate swallows them.
pub mod error;
pub use self::error::{AssertError, AssertErrorKind, ErrorKindOf};

/// Polling a device-backed predicate until it holds. Tests usually shell out to the device inside
/// the predicate and re-parse its output, optionally nudging the device between attempts with a
/// retry action (toggling the screen, re-sending a packet).
pub mod retry;
pub use self::retry::{expect_with_retry, RetryPolicy};

/// The same polling loop for predicates that are futures. Waiting uses the tokio timer, so the
/// executor stays free between attempts.
pub mod async_retry;
pub use self::async_retry::expect_with_retry_async;

/// Asserting that an operation fails, and fails with the right kind of error.
pub mod throws;
pub use self::throws::expect_throws;
