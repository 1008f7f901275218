//! Execution engine and run coordinator for Fabula stories.
//!
//! [`run_topics`] walks every selected topic, story and path strictly one
//! after another. Each path gets a fresh driver from the caller's
//! [`DriverFactory`](fabula_interface::DriverFactory); failures and panics
//! are contained to the path that raised them. Progress is reported to a
//! [`RunObserver`], and the totals come back as a [`RunSummary`].

mod console;
mod coordinator;
mod engine;
mod observer;
mod options;
mod pattern;
mod summary;

pub use console::{ConsoleReporter, REPORT_WIDTH};
pub use coordinator::run_topics;
pub use engine::{DEFERRED_SUFFIX, PathEngine};
pub use observer::{ObserverChain, PathOutcome, PathReport, RunObserver, StoryStatus};
pub use options::{RunOptions, RunOptionsBuilder, RunOptionsBuilderError};
pub use pattern::{Pattern, any_match, parse_patterns};
pub use summary::RunSummary;
