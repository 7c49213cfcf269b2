use failure::Fail;
use nettest_packets::{PacketError, PacketErrorKind};
use std::fmt::Debug;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertErrorKind {
    /// The awaited condition never held, or an operation that should have failed did not.
    UnexpectedBehavior,
    /// An operation failed with a different kind of error than the one expected.
    UnexpectedException,
}

#[derive(Debug, Fail)]
pub enum AssertError {
    #[fail(display = "Predicate didn't become true after {} retries.", attempts)]
    RetriesExhausted { attempts: usize },

    #[fail(
        display = "Expected an error of kind {}, but none was returned",
        expected
    )]
    NothingRaised { expected: String },

    #[fail(
        display = "Expected an error of kind {}, but got {}: {}",
        expected, actual, message
    )]
    UnexpectedException {
        expected: String,
        actual: String,
        message: String,
    },
}

impl AssertError {
    pub fn kind(&self) -> AssertErrorKind {
        match self {
            AssertError::RetriesExhausted { .. } | AssertError::NothingRaised { .. } => {
                AssertErrorKind::UnexpectedBehavior
            }
            AssertError::UnexpectedException { .. } => AssertErrorKind::UnexpectedException,
        }
    }
}

/// Errors that can be told apart by a comparable kind, so `expect_throws` can check that an
/// operation failed the way the caller expected.
pub trait ErrorKindOf {
    type Kind: PartialEq + Debug;

    fn error_kind(&self) -> Self::Kind;
}

impl ErrorKindOf for AssertError {
    type Kind = AssertErrorKind;

    fn error_kind(&self) -> AssertErrorKind {
        self.kind()
    }
}

impl ErrorKindOf for PacketError {
    type Kind = PacketErrorKind;

    fn error_kind(&self) -> PacketErrorKind {
        self.kind()
    }
}

impl ErrorKindOf for io::Error {
    type Kind = io::ErrorKind;

    fn error_kind(&self) -> io::ErrorKind {
        self.kind()
    }
}
