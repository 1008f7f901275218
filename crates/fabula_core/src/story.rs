//! Stories: one test scenario each.

use crate::{Node, Path, Steps, enumerate_paths};
use derive_getters::Getters;
use fabula_error::{StoryError, StoryErrorKind};

/// A described step specification.
///
/// An absent specification means the whole story is deferred: it is
/// reported, but nothing runs.
#[derive(Getters)]
pub struct Story<D> {
    /// Story description
    description: String,

    /// Step specification, absent when the story is wholly deferred
    spec: Option<Steps<D>>,
}

impl<D> Story<D> {
    /// Creates a story.
    pub fn new(description: impl Into<String>, spec: Option<Steps<D>>) -> Self {
        Self {
            description: description.into(),
            spec,
        }
    }

    /// True when the story has no specification at all.
    pub fn is_deferred(&self) -> bool {
        self.spec.is_none()
    }

    /// Every linear path through the story.
    pub fn paths(&self) -> Vec<Path<D>> {
        enumerate_paths(self.spec.as_ref())
    }

    /// Checks the specification is well formed.
    ///
    /// # Errors
    ///
    /// Returns an error if the specification is present but empty, or if
    /// any fork group has no members.
    pub fn validate(&self) -> Result<(), StoryError> {
        let Some(spec) = &self.spec else {
            return Ok(());
        };
        if spec.is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyStory {
                story: self.description.clone(),
            }));
        }
        self.validate_nodes(spec)
    }

    fn validate_nodes(&self, steps: &Steps<D>) -> Result<(), StoryError> {
        for node in steps.nodes() {
            if let Node::Fork(alternative) = node {
                if alternative.is_empty() {
                    return Err(StoryError::new(StoryErrorKind::EmptyForkGroup {
                        story: self.description.clone(),
                    }));
                }
                self.validate_nodes(alternative)?;
            }
        }
        Ok(())
    }
}

impl<D> Clone for Story<D> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            spec: self.spec.clone(),
        }
    }
}

impl<D> std::fmt::Debug for Story<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Story")
            .field("description", &self.description)
            .field("spec", &self.spec)
            .finish()
    }
}
