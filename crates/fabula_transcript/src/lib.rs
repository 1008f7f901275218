//! Transcripts: what each topic's stories actually did over HTTP.
//!
//! The [`TranscriptRecorder`] follows execution of one topic and records,
//! per story, every step exercised together with the actions and notes the
//! driver attributed to it. A step reached again through the same prefix of
//! steps on a later path is listed only once. The [`TranscriptWriter`]
//! persists finished transcripts as JSON documents plus an index.

mod recorder;
mod records;
mod writer;

pub use recorder::TranscriptRecorder;
pub use records::{IndexEntry, SetupRecord, StepRecord, StoryRecord, Transcript, TranscriptIndex};
pub use writer::{INDEX_FILE, TranscriptWriter};
