//! Error types for story execution.

/// Error kinds raised by the runner itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RunErrorKind {
    /// A filter pattern failed to compile.
    #[display("Invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern as supplied
        pattern: String,
        /// Compiler message
        message: String,
    },
    /// A hook or step action panicked.
    #[display("Path '{path}' panicked: {message}")]
    Panicked {
        /// Description of the path that panicked
        path: String,
        /// Panic payload, when it was a string
        message: String,
    },
    /// A run observer failed to emit its report.
    #[display("Report failed: {}", _0)]
    Report(String),
}

/// Runner error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Run Error: {} at line {} in {}", kind, line, file)]
pub struct RunError {
    kind: RunErrorKind,
    line: u32,
    file: &'static str,
}

impl RunError {
    /// Create a new runner error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RunErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RunErrorKind {
        &self.kind
    }
}

impl<T> From<T> for RunError
where
    T: Into<RunErrorKind>,
{
    #[track_caller]
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}
