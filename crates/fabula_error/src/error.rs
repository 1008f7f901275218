//! Top-level error type aggregating every Fabula error.

use crate::{ConfigError, DriverError, RunError, StoryError, TranscriptError};

/// All the ways a Fabula operation can fail.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum FabulaErrorKind {
    /// Story declaration error
    #[display("{}", _0)]
    Story(StoryError),
    /// Driver, hook or step action error
    #[display("{}", _0)]
    Driver(DriverError),
    /// Runner error
    #[display("{}", _0)]
    Run(RunError),
    /// Transcript error
    #[display("{}", _0)]
    Transcript(TranscriptError),
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
}

/// Fabula error.
///
/// Anything convertible into [`FabulaErrorKind`] converts into this type, so
/// step actions can use `?` on driver errors directly.
///
/// # Examples
///
/// ```
/// use fabula_error::{DriverError, FabulaError, FabulaErrorKind};
///
/// let err: FabulaError = DriverError::new("timeout").into();
/// assert!(matches!(err.kind(), FabulaErrorKind::Driver(_)));
/// ```
#[derive(Debug, Clone, derive_more::Display)]
#[display("Fabula Error: {}", _0)]
pub struct FabulaError(Box<FabulaErrorKind>);

impl FabulaError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulaErrorKind {
        &self.0
    }
}

impl std::error::Error for FabulaError {}

impl<T> From<T> for FabulaError
where
    T: Into<FabulaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabula operations.
pub type FabulaResult<T> = Result<T, FabulaError>;
