//! Fabula: story-driven HTTP API testing.
//!
//! Tests are written as topics of stories. Each story is a graph of steps
//! that may fork into alternatives or stop early at a deferred marker; every
//! linear path through it is replayed against a fresh [`ApiDriver`], and what
//! each step did over HTTP is kept in a per-topic [`Transcript`].
//!
//! # Example
//!
//! ```rust,ignore
//! use fabula::{Suite, fork, step};
//!
//! #[tokio::main]
//! async fn main() -> std::process::ExitCode {
//!     let mut suite = Suite::new();
//!     suite
//!         .topic("Users", |t| {
//!             t.story(
//!                 "sign up",
//!                 step("register", register).then(fork([
//!                     step("confirm email", confirm),
//!                     step("abandon", abandon),
//!                 ])),
//!             );
//!             t.deferred("delete account");
//!         })
//!         .expect("valid stories");
//!
//!     fabula::cli::run(&suite, |config| {
//!         let endpoint = config.endpoint().clone().unwrap_or_default();
//!         move || HttpDriver::new(&endpoint)
//!     })
//!     .await
//! }
//! ```

pub mod cli;
mod settings;

pub use settings::{CONFIG_FILE, ENV_PREFIX, RunnerConfig};

pub use fabula_core::{
    BODY_STEP, BoxFuture, Hook, Node, Path, PathEntry, Step, StepAction, Steps, Story, Suite,
    Topic, TopicBuilder, deferred, enumerate_paths, fork, pending, step, step_with,
};
pub use fabula_error::{
    ConfigError, ConfigErrorKind, DriverError, FabulaError, FabulaErrorKind, FabulaResult, RunError,
    RunErrorKind, StoryError, StoryErrorKind, TranscriptError, TranscriptErrorKind,
};
pub use fabula_interface::{
    Action, ApiDriver, DriverFactory, ExpectationResults, PendingAction, ResponseSnapshot, Scribe,
};
pub use fabula_runner::{
    ConsoleReporter, ObserverChain, PathOutcome, PathReport, Pattern, RunObserver, RunOptions,
    RunOptionsBuilder, RunSummary, StoryStatus, parse_patterns, run_topics,
};
pub use fabula_transcript::{Transcript, TranscriptRecorder, TranscriptWriter};
