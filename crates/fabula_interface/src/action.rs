//! Recorded HTTP exchanges.

use derive_getters::Getters;
use fabula_error::{TranscriptError, TranscriptErrorKind};
use serde::{Deserialize, Serialize};

/// Snapshot of a response as it looked when the exchange completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSnapshot {
    /// HTTP status code, absent when the call never produced a response.
    status_code: Option<u16>,

    /// Response body.
    body: serde_json::Value,
}

impl ResponseSnapshot {
    /// Captures a response by deep-copying its body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    pub fn capture<B: Serialize + ?Sized>(
        status_code: Option<u16>,
        body: &B,
    ) -> Result<Self, TranscriptError> {
        let body = serde_json::to_value(body).map_err(|e| {
            TranscriptError::new(TranscriptErrorKind::Serialization(e.to_string()))
        })?;
        Ok(Self { status_code, body })
    }
}

/// One HTTP exchange attributed to a step.
///
/// Actions are reserved before the call is made and filled in when it
/// resolves. A slot that is never filled stays empty and serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct Action {
    /// Who performed the call (e.g. the authenticated user).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actor: Option<String>,

    /// Deep copy of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request: Option<serde_json::Value>,

    /// Deep copy of the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<ResponseSnapshot>,
}

impl Action {
    /// Creates a filled action.
    pub fn new(actor: String, request: serde_json::Value, response: ResponseSnapshot) -> Self {
        Self {
            actor: Some(actor),
            request: Some(request),
            response: Some(response),
        }
    }

    /// True when the slot was never filled.
    pub fn is_empty(&self) -> bool {
        self.actor.is_none() && self.request.is_none() && self.response.is_none()
    }
}
