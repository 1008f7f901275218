//! Transcript error types.

/// Kinds of transcript errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TranscriptErrorKind {
    /// A request or transcript could not be serialized
    #[display("Serialization error: {}", _0)]
    Serialization(String),
    /// Writing a transcript to disk failed
    #[display("I/O error: {}", _0)]
    Io(String),
}

/// Transcript error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{TranscriptError, TranscriptErrorKind};
///
/// let err = TranscriptError::new(TranscriptErrorKind::Io("disk full".to_string()));
/// assert!(format!("{}", err).contains("disk full"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transcript Error: {} at line {} in {}", kind, line, file)]
pub struct TranscriptError {
    /// The kind of error that occurred
    pub kind: TranscriptErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TranscriptError {
    /// Create a new transcript error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TranscriptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
