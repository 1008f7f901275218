//! Persisting transcripts to disk.

use crate::records::{IndexEntry, Transcript, TranscriptIndex};
use fabula_error::{TranscriptError, TranscriptErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Name of the index file written next to the transcripts.
pub const INDEX_FILE: &str = "index2.json";

/// Writes transcripts into one directory and keeps an index of them.
#[derive(Debug)]
pub struct TranscriptWriter {
    dir: PathBuf,
    commit: Option<String>,
    entries: Vec<IndexEntry>,
}

impl TranscriptWriter {
    /// Creates a writer for `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>, commit: Option<String>) -> Result<Self, TranscriptError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
        debug!(dir = %dir.display(), "Transcript directory ready");
        Ok(Self {
            dir,
            commit,
            entries: Vec::new(),
        })
    }

    /// Writes one transcript and records it in the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the transcript cannot be serialized or written.
    #[instrument(skip_all, fields(transcript = %transcript.description()))]
    pub fn write(&mut self, transcript: &Transcript) -> Result<PathBuf, TranscriptError> {
        let file = file_name(transcript.description());
        let path = self.dir.join(&file);
        let json = serde_json::to_string_pretty(transcript).map_err(|e| {
            TranscriptError::new(TranscriptErrorKind::Serialization(e.to_string()))
        })?;
        std::fs::write(&path, json).map_err(|e| io_error(&path, e))?;

        info!(file = %path.display(), "Wrote transcript");
        self.entries
            .push(IndexEntry::new(transcript.description().clone(), file));
        Ok(path)
    }

    /// Index of everything written so far.
    pub fn index(&self) -> TranscriptIndex {
        TranscriptIndex::new(self.commit.clone(), self.entries.clone())
    }

    /// Writes the index file.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be serialized or written.
    #[instrument(skip(self), fields(transcripts = self.entries.len()))]
    pub fn write_index(&self) -> Result<PathBuf, TranscriptError> {
        let path = self.dir.join(INDEX_FILE);
        let json = serde_json::to_string_pretty(&self.index()).map_err(|e| {
            TranscriptError::new(TranscriptErrorKind::Serialization(e.to_string()))
        })?;
        std::fs::write(&path, json).map_err(|e| io_error(&path, e))?;
        info!(file = %path.display(), "Wrote transcript index");
        Ok(path)
    }
}

/// File name for a transcript: the last path segment of its description
/// with spaces replaced by underscores.
fn file_name(description: &str) -> String {
    let base = description.rsplit('/').next().unwrap_or(description);
    format!("{}.json", base.replace(' ', "_"))
}

#[track_caller]
fn io_error(path: &Path, err: std::io::Error) -> TranscriptError {
    TranscriptError::new(TranscriptErrorKind::Io(format!(
        "{}: {}",
        path.display(),
        err
    )))
}
