//! Trait definitions for the Fabula API story runner.
//!
//! The runner never talks HTTP itself. It drives an [`ApiDriver`] supplied by
//! the caller, hands it a [`Scribe`] while a step is running, and asks it for
//! [`ExpectationResults`] once a path is complete.

mod action;
mod driver;
mod expectation;
mod scribe;

pub use action::{Action, ResponseSnapshot};
pub use driver::{ApiDriver, DriverFactory};
pub use expectation::ExpectationResults;
pub use scribe::{PendingAction, Scribe, ScribeEvent, ScribeLog};
