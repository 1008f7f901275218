//! Recording handles given to drivers while a step runs.
//!
//! A [`Scribe`] is the write end of a channel owned by the transcript
//! recorder. Reserving an action pushes a slot into the channel immediately,
//! so actions keep call order even though each slot is filled later, when the
//! underlying request resolves.

use crate::{Action, ResponseSnapshot};
use fabula_error::{TranscriptError, TranscriptErrorKind};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Something a driver recorded while scribing was on.
#[derive(Debug)]
pub enum ScribeEvent {
    /// An action slot, filled once the exchange completes.
    Reserve(oneshot::Receiver<Action>),
    /// A free-text annotation placed before the next action.
    Doc(String),
}

/// Handle a driver uses to attribute actions and notes to the running step.
#[derive(Debug, Clone)]
pub struct Scribe {
    sender: mpsc::UnboundedSender<ScribeEvent>,
}

/// Read end of a scribe channel, drained by the recorder.
#[derive(Debug)]
pub struct ScribeLog {
    receiver: mpsc::UnboundedReceiver<ScribeEvent>,
}

impl Scribe {
    /// Creates a connected scribe and log.
    pub fn channel() -> (Scribe, ScribeLog) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Scribe { sender }, ScribeLog { receiver })
    }

    /// Reserves the next action slot.
    ///
    /// Call this when the request is issued, then fill the returned handle
    /// once the response arrives.
    pub fn reserve(&self) -> PendingAction {
        let (sender, receiver) = oneshot::channel();
        if self.sender.send(ScribeEvent::Reserve(receiver)).is_err() {
            debug!("Recorder closed, action will not be transcribed");
        }
        PendingAction {
            sender: Some(sender),
        }
    }

    /// Attaches a note in front of the next action.
    pub fn doc(&self, message: impl Into<String>) {
        if self.sender.send(ScribeEvent::Doc(message.into())).is_err() {
            debug!("Recorder closed, note will not be transcribed");
        }
    }
}

impl ScribeLog {
    /// Takes every event recorded so far, in call order.
    pub fn drain(&mut self) -> Vec<ScribeEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}

/// A reserved action slot waiting for its exchange to complete.
#[derive(Debug)]
pub struct PendingAction {
    sender: Option<oneshot::Sender<Action>>,
}

impl PendingAction {
    /// Fills the slot.
    ///
    /// The request is deep-copied here, so later mutation of the caller's
    /// request object does not leak into the transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be serialized.
    pub fn fill<R: Serialize + ?Sized>(
        mut self,
        actor: impl Into<String>,
        request: &R,
        response: ResponseSnapshot,
    ) -> Result<(), TranscriptError> {
        let request = serde_json::to_value(request).map_err(|e| {
            TranscriptError::new(TranscriptErrorKind::Serialization(e.to_string()))
        })?;
        if let Some(sender) = self.sender.take() {
            if sender
                .send(Action::new(actor.into(), request, response))
                .is_err()
            {
                debug!("Transcript already finished, dropping late action");
            }
        }
        Ok(())
    }
}
