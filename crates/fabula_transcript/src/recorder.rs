//! Per-topic transcript recording.

use crate::records::{DocStrings, SetupRecord, StepRecord, StoryRecord, Transcript};
use fabula_interface::{Action, Scribe, ScribeEvent, ScribeLog};
use std::collections::HashSet;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, instrument, trace, warn};

/// Suffix appended to a topic description to name its transcript.
const TRANSCRIPT_SUFFIX: &str = " (stories)";

/// An action slot, resolved when the transcript is finished.
#[derive(Debug)]
enum ActionSlot {
    Pending(oneshot::Receiver<Action>),
    Resolved(Action),
}

impl ActionSlot {
    fn resolve(self) -> Action {
        match self {
            ActionSlot::Resolved(action) => action,
            ActionSlot::Pending(mut receiver) => match receiver.try_recv() {
                Ok(action) => action,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => Action::default(),
            },
        }
    }
}

#[derive(Debug, Default)]
struct RecordDraft {
    actions: Vec<ActionSlot>,
    doc_strings: DocStrings,
}

impl RecordDraft {
    fn absorb(&mut self, events: Vec<ScribeEvent>) {
        for event in events {
            match event {
                ScribeEvent::Reserve(receiver) => self.actions.push(ActionSlot::Pending(receiver)),
                ScribeEvent::Doc(message) => self
                    .doc_strings
                    .entry(self.actions.len())
                    .or_default()
                    .push(message),
            }
        }
    }

    fn resolve(self) -> (Vec<Action>, DocStrings) {
        let actions = self.actions.into_iter().map(ActionSlot::resolve).collect();
        (actions, self.doc_strings)
    }
}

#[derive(Debug)]
struct StepDraft {
    description: String,
    depth: usize,
    is_fork: bool,
    record: RecordDraft,
}

#[derive(Debug)]
struct StoryDraft {
    description: String,
    steps: Vec<StepDraft>,
}

/// Where scribed events currently go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Scratch,
    Setup,
    Step { story: usize, step: usize },
}

/// Records what one topic's stories did.
///
/// The recorder owns the read end of a scribe channel. The engine hands
/// [`TranscriptRecorder::scribe`] to the driver and tells the recorder which
/// scope is running; events are drained into the record of that scope each
/// time the scope changes.
///
/// Steps are deduplicated by the chain of step descriptions leading to them
/// within their story. A step reached through an already recorded chain still
/// runs and its driver still scribes, but the events land in a scratch record
/// that is discarded.
#[derive(Debug)]
pub struct TranscriptRecorder {
    description: String,
    scribe: Scribe,
    log: ScribeLog,
    target: Target,
    scratch: RecordDraft,
    setup: Option<RecordDraft>,
    stories: Vec<StoryDraft>,
    current_story: Option<usize>,
    past_steps: HashSet<String>,
    prefix: String,
    depth: usize,
}

impl TranscriptRecorder {
    /// Creates a recorder for the named topic.
    pub fn new(topic: impl AsRef<str>) -> Self {
        let (scribe, log) = Scribe::channel();
        Self {
            description: format!("{}{}", topic.as_ref(), TRANSCRIPT_SUFFIX),
            scribe,
            log,
            target: Target::Scratch,
            scratch: RecordDraft::default(),
            setup: None,
            stories: Vec::new(),
            current_story: None,
            past_steps: HashSet::new(),
            prefix: String::new(),
            depth: 0,
        }
    }

    /// Transcript description: the topic description plus `" (stories)"`.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Handle to give the driver when scribing is turned on.
    pub fn scribe(&self) -> Scribe {
        self.scribe.clone()
    }

    /// Opens a scope whose events are not persisted (global hooks).
    pub fn begin_scratch(&mut self) {
        self.switch(Target::Scratch);
        self.scratch = RecordDraft::default();
    }

    /// Opens the story-level before-hook scope.
    ///
    /// Only the first run is persisted, as the transcript's setup; later runs
    /// record into scratch.
    pub fn begin_setup(&mut self) {
        if self.setup.is_none() {
            self.switch(Target::Setup);
            self.setup = Some(RecordDraft::default());
            debug!(topic = %self.description, "Recording setup");
        } else {
            self.begin_scratch();
        }
    }

    /// Starts a story's record.
    pub fn begin_story(&mut self, description: impl Into<String>) {
        self.switch(Target::Scratch);
        self.stories.push(StoryDraft {
            description: description.into(),
            steps: Vec::new(),
        });
        self.current_story = Some(self.stories.len() - 1);
    }

    /// Closes the current story.
    pub fn end_story(&mut self) {
        self.switch(Target::Scratch);
        self.current_story = None;
    }

    /// Starts a path through the current story.
    pub fn begin_path(&mut self) {
        self.switch(Target::Scratch);
        self.prefix = self
            .current_story
            .map(|i| self.stories[i].description.clone())
            .unwrap_or_default();
        self.depth = 0;
    }

    /// Opens a step scope.
    ///
    /// A new step record is created only the first time this chain of step
    /// descriptions is seen in the story.
    #[instrument(level = "trace", skip(self), fields(depth = self.depth))]
    pub fn begin_step(&mut self, description: &str, is_fork: bool) {
        self.prefix.push('>');
        self.prefix.push_str(description);
        let depth = self.depth;
        self.depth += 1;

        let Some(story) = self.current_story else {
            warn!(step = description, "Step recorded outside of a story");
            self.begin_scratch();
            return;
        };

        if self.past_steps.insert(self.prefix.clone()) {
            let steps = &mut self.stories[story].steps;
            steps.push(StepDraft {
                description: description.to_string(),
                depth,
                is_fork,
                record: RecordDraft::default(),
            });
            let step = steps.len() - 1;
            self.switch(Target::Step { story, step });
        } else {
            trace!(prefix = %self.prefix, "Step already recorded");
            self.begin_scratch();
        }
    }

    /// Closes the current scope, whatever it is.
    pub fn end_scope(&mut self) {
        self.switch(Target::Scratch);
    }

    /// Ends the current path.
    pub fn end_path(&mut self) {
        self.switch(Target::Scratch);
        self.prefix.clear();
        self.depth = 0;
    }

    /// Finishes recording and resolves every action slot.
    ///
    /// Slots whose exchange never completed become empty actions.
    #[instrument(skip(self), fields(topic = %self.description))]
    pub fn finish(mut self) -> Transcript {
        self.switch(Target::Scratch);

        let setup = self.setup.map(|draft| {
            let (actions, doc_strings) = draft.resolve();
            SetupRecord::new(actions, doc_strings)
        });

        let stories = self
            .stories
            .into_iter()
            .map(|story| {
                let steps = story
                    .steps
                    .into_iter()
                    .map(|step| {
                        let (actions, doc_strings) = step.record.resolve();
                        StepRecord::new(
                            step.description,
                            step.depth,
                            step.is_fork,
                            actions,
                            doc_strings,
                        )
                    })
                    .collect();
                StoryRecord::new(story.description, steps)
            })
            .collect::<Vec<_>>();

        debug!(stories = stories.len(), "Transcript finished");
        Transcript::new(self.description, setup, stories)
    }

    /// Drains pending events into the current target, then retargets.
    fn switch(&mut self, next: Target) {
        let events = self.log.drain();
        if !events.is_empty() {
            let record = match self.target {
                Target::Scratch => Some(&mut self.scratch),
                Target::Setup => self.setup.as_mut(),
                Target::Step { story, step } => self
                    .stories
                    .get_mut(story)
                    .and_then(|s| s.steps.get_mut(step))
                    .map(|s| &mut s.record),
            };
            match record {
                Some(record) => record.absorb(events),
                None => warn!(events = events.len(), "Dropping events with no open record"),
            }
        }
        self.target = next;
    }
}
