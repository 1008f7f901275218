//! Steps: named units of work.

use crate::StepAction;
use std::sync::Arc;

/// Description given to the anonymous step wrapping a story's callable body.
///
/// Paths made of this step alone have an empty description.
pub const BODY_STEP: &str = "$body$";

/// A single named unit of work invoked with a driver.
pub struct Step<D> {
    description: String,
    action: Option<Arc<dyn StepAction<D>>>,
    is_fork: bool,
}

impl<D> Step<D> {
    /// Creates a step. A step without an action is pending: paths end
    /// there, marked deferred.
    pub fn new(description: impl Into<String>, action: Option<Arc<dyn StepAction<D>>>) -> Self {
        Self {
            description: description.into(),
            action,
            is_fork: false,
        }
    }

    /// Step description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The step's action, absent for pending steps.
    pub fn action(&self) -> Option<&Arc<dyn StepAction<D>>> {
        self.action.as_ref()
    }

    /// True when this step opens an alternative in a fork group.
    pub fn is_fork(&self) -> bool {
        self.is_fork
    }

    /// True when the step has no action yet.
    pub fn is_pending(&self) -> bool {
        self.action.is_none()
    }

    /// True for the anonymous step wrapping a story body.
    pub fn is_body(&self) -> bool {
        self.description == BODY_STEP
    }

    pub(crate) fn mark_fork(&mut self) {
        self.is_fork = true;
    }
}

impl<D> Clone for Step<D> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            action: self.action.clone(),
            is_fork: self.is_fork,
        }
    }
}

impl<D> std::fmt::Debug for Step<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("description", &self.description)
            .field("is_fork", &self.is_fork)
            .field("pending", &self.is_pending())
            .finish()
    }
}
