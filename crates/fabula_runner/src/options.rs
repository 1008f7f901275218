//! Run selection options.

use crate::{Pattern, any_match};
use derive_getters::Getters;

/// Which topics, stories and paths to run.
///
/// Each filter is optional; an absent filter selects everything. Within a
/// filter, an item is selected when any pattern matches it.
///
/// # Example
///
/// ```rust,ignore
/// let options = RunOptionsBuilder::default()
///     .stories(parse_patterns("sign up")?)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default, Getters, derive_builder::Builder)]
#[builder(default, setter(into, strip_option))]
pub struct RunOptions {
    /// Topic description filters
    topics: Option<Vec<Pattern>>,

    /// Story description filters
    stories: Option<Vec<Pattern>>,

    /// Path description filters
    paths: Option<Vec<Pattern>>,
}

impl RunOptions {
    /// Creates options from optional filters.
    pub fn new(
        topics: Option<Vec<Pattern>>,
        stories: Option<Vec<Pattern>>,
        paths: Option<Vec<Pattern>>,
    ) -> Self {
        Self {
            topics,
            stories,
            paths,
        }
    }

    /// True when the topic is selected.
    pub fn selects_topic(&self, description: &str) -> bool {
        selects(self.topics.as_deref(), description)
    }

    /// True when the story is selected.
    pub fn selects_story(&self, description: &str) -> bool {
        selects(self.stories.as_deref(), description)
    }

    /// True when the path is selected.
    pub fn selects_path(&self, description: &str) -> bool {
        selects(self.paths.as_deref(), description)
    }
}

fn selects(patterns: Option<&[Pattern]>, text: &str) -> bool {
    patterns.is_none_or(|patterns| any_match(patterns, text))
}
