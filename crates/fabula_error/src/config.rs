//! Runner configuration errors.

/// What went wrong while loading runner settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A settings file could not be read
    #[display("Failed to read config file: {}", _0)]
    Read(String),
    /// A settings file is not valid TOML for the runner settings
    #[display("Failed to parse config: {}", _0)]
    Parse(String),
    /// The layered sources (file, environment) could not be combined
    #[display("Failed to load configuration: {}", _0)]
    Load(String),
    /// The combined settings do not describe a runner configuration
    #[display("Invalid configuration: {}", _0)]
    Invalid(String),
}

/// Configuration error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Invalid("endpoint: not a string".into()));
/// assert!(matches!(err.kind(), ConfigErrorKind::Invalid(_)));
/// assert!(err.to_string().contains("endpoint"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}
