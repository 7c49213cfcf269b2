use crate::{AssertError, ErrorKindOf};
use std::fmt::Display;
use tracing::debug;

/// Runs `operation` and checks that it fails with an error of kind `expected`.
///
/// - `Ok(_)` is reported as `AssertError::NothingRaised`.
/// - An error of another kind is reported as `AssertError::UnexpectedException`, carrying both
///   kinds and the error's message, so a wrong failure mode is never confused with the
///   assertion itself failing.
pub fn expect_throws<T, E, F>(operation: F, expected: E::Kind) -> Result<(), AssertError>
where
    F: FnOnce() -> Result<T, E>,
    E: ErrorKindOf + Display,
{
    match operation() {
        Ok(_) => Err(AssertError::NothingRaised {
            expected: format!("{:?}", expected),
        }),
        Err(err) => {
            let actual = err.error_kind();
            if actual == expected {
                debug!(kind = ?actual, "operation failed as expected");
                Ok(())
            } else {
                Err(AssertError::UnexpectedException {
                    expected: format!("{:?}", expected),
                    actual: format!("{:?}", actual),
                    message: err.to_string(),
                })
            }
        }
    }
}
