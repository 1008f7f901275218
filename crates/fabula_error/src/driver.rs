//! Driver error types.

/// Error raised by an API driver, a hook or a step action.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Driver Error: {} at line {} in {}", message, line, file)]
pub struct DriverError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl DriverError {
    /// Create a new DriverError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_error::DriverError;
    ///
    /// let err = DriverError::new("Connection refused");
    /// assert!(err.message.contains("Connection refused"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
