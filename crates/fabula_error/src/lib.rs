//! Error types for the Fabula API story runner.
//!
//! Every error records the source location where it was created so that a
//! failing path can be traced back to the hook, step or driver that raised it.

mod config;
mod driver;
mod error;
mod run;
mod story;
mod transcript;

pub use config::{ConfigError, ConfigErrorKind};
pub use driver::DriverError;
pub use error::{FabulaError, FabulaErrorKind, FabulaResult};
pub use run::{RunError, RunErrorKind};
pub use story::{StoryError, StoryErrorKind};
pub use transcript::{TranscriptError, TranscriptErrorKind};
