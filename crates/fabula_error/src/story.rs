//! Story declaration error types.

/// Specific error conditions raised while declaring stories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoryErrorKind {
    /// A fork group was declared without any alternatives
    EmptyForkGroup {
        /// Story containing the fork group
        story: String,
    },
    /// A story specification is present but contains no nodes
    EmptyStory {
        /// Story description
        story: String,
    },
}

impl std::fmt::Display for StoryErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryErrorKind::EmptyForkGroup { story } => write!(
                f,
                "Story '{}' declares a fork group with no alternatives",
                story
            ),
            StoryErrorKind::EmptyStory { story } => write!(
                f,
                "Story '{}' has an empty step specification (use a deferred story instead)",
                story
            ),
        }
    }
}

/// Error type for story declarations.
///
/// # Examples
///
/// ```
/// use fabula_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::EmptyStory { story: "login".into() });
/// assert!(format!("{}", err).contains("login"));
/// ```
#[derive(Debug, Clone)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for StoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Story Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for StoryError {}
