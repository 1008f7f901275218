//! Persisted transcript shapes.

use derive_getters::Getters;
use fabula_interface::Action;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Notes keyed by the index of the action they precede.
pub type DocStrings = BTreeMap<usize, Vec<String>>;

/// Recorded trace of one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Transcript {
    /// Topic description
    description: String,

    /// Actions captured the first time the story-level before-hook ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    setup: Option<SetupRecord>,

    /// Stories in execution order
    stories: Vec<StoryRecord>,
}

impl Transcript {
    pub(crate) fn new(
        description: String,
        setup: Option<SetupRecord>,
        stories: Vec<StoryRecord>,
    ) -> Self {
        Self {
            description,
            setup,
            stories,
        }
    }

    /// Finds a story by description.
    pub fn story(&self, description: &str) -> Option<&StoryRecord> {
        self.stories.iter().find(|s| s.description == description)
    }
}

/// Actions captured while setting up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct SetupRecord {
    /// Actions in call order
    actions: Vec<Action>,

    /// Notes keyed by action index
    #[serde(default)]
    doc_strings: DocStrings,
}

impl SetupRecord {
    pub(crate) fn new(actions: Vec<Action>, doc_strings: DocStrings) -> Self {
        Self {
            actions,
            doc_strings,
        }
    }
}

/// One story and the steps it exercised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct StoryRecord {
    /// Story description
    description: String,

    /// Unique steps, in the order they were first reached
    #[serde(default)]
    steps: Vec<StepRecord>,
}

impl StoryRecord {
    pub(crate) fn new(description: String, steps: Vec<StepRecord>) -> Self {
        Self { description, steps }
    }
}

/// One step as first reached through a given prefix of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    /// Step description
    description: String,

    /// Number of steps before this one on the path
    depth: usize,

    /// Whether the step opens an alternative
    is_fork: bool,

    /// HTTP exchanges in call order
    actions: Vec<Action>,

    /// Notes keyed by the index of the action they precede
    #[serde(default)]
    doc_strings: DocStrings,
}

impl StepRecord {
    pub(crate) fn new(
        description: String,
        depth: usize,
        is_fork: bool,
        actions: Vec<Action>,
        doc_strings: DocStrings,
    ) -> Self {
        Self {
            description,
            depth,
            is_fork,
            actions,
            doc_strings,
        }
    }
}

/// Index of every transcript written in one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct TranscriptIndex {
    /// Commit of the API under test, when known
    commit: Option<String>,

    /// Written transcripts
    transcripts: Vec<IndexEntry>,
}

impl TranscriptIndex {
    pub(crate) fn new(commit: Option<String>, transcripts: Vec<IndexEntry>) -> Self {
        Self {
            commit,
            transcripts,
        }
    }
}

/// One written transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct IndexEntry {
    /// Transcript description
    desc: String,

    /// File name relative to the transcript directory
    file: String,
}

impl IndexEntry {
    pub(crate) fn new(desc: String, file: String) -> Self {
        Self { desc, file }
    }
}
