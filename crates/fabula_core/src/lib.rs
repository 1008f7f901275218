//! Story graph model for the Fabula API story runner.
//!
//! A story is declared as a sequence of [`Node`]s:
//! - steps, which run one after another,
//! - fork groups, each an alternative continuation from the same point,
//! - deferred markers, which end a path on purpose.
//!
//! [`enumerate_paths`] turns a story into every linear [`Path`] through it.

mod action;
mod node;
mod path;
mod step;
mod story;
mod topic;

pub use action::{BoxFuture, Hook, StepAction};
pub use node::{Node, Steps, deferred, fork, pending, step, step_with};
pub use path::{Path, PathEntry, enumerate_paths};
pub use step::{BODY_STEP, Step};
pub use story::Story;
pub use topic::{Suite, Topic, TopicBuilder};
