//! The authenticated record carried by a token.

use crate::error::TokenError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload plus optional expiry, as serialized inside a token.
///
/// Serialized as `{"e":<secs>,"d":<payload>}`, or `{"d":<payload>}` when the
/// token never expires. An envelope is never modified after construction;
/// re-signing builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Expiry as epoch seconds.
    #[serde(rename = "e", default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<i64>,

    /// Application payload.
    #[serde(rename = "d")]
    payload: Value,
}

impl Envelope {
    /// Envelope for a token that never expires.
    pub fn new(payload: Value) -> Self {
        Self {
            expires_at: None,
            payload,
        }
    }

    /// Envelope for a token valid up to and including `expires_at`.
    pub fn expiring(payload: Value, expires_at: i64) -> Self {
        Self {
            expires_at: Some(expires_at),
            payload,
        }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.expires_at
    }

    /// Whether the envelope has expired at `now` (epoch seconds).
    ///
    /// The expiry second itself is still valid.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, TokenError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self, TokenError> {
        serde_json::from_slice(bytes)
            .map_err(|e| TokenError::malformed(format!("invalid envelope: {e}")))
    }
}
