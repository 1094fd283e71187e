//! Error types for token operations.

use stamp_codec::CodecError;
use thiserror::Error;

/// Errors that can occur while signing or verifying tokens.
///
/// Every verification failure means "reject this token". The variants only
/// tell the caller why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token does not have the `<envelope>.<tag>` shape, or the envelope
    /// is not a valid record.
    #[error("malformed token: {reason}")]
    MalformedToken { reason: String },

    /// A token segment contains a character outside the base-62 alphabet.
    #[error(transparent)]
    InvalidCharacter(#[from] CodecError),

    /// The recomputed tag does not match the one carried by the token.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token expiry is strictly before the verification time.
    #[error("token expired at {expired_at}, current time is {current_time}")]
    TokenExpired {
        /// Expiry carried by the token (Unix timestamp)
        expired_at: i64,
        /// Time of the verification attempt (Unix timestamp)
        current_time: i64,
    },

    /// A payload could not be converted to or from JSON.
    #[error("payload serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A digest primitive rejected its input; not expected in practice.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TokenError {
    /// Check if this error is due to token expiration
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::TokenExpired { .. })
    }

    /// Check if this error means the token was forged or tampered with
    pub fn is_signature_error(&self) -> bool {
        matches!(self, TokenError::InvalidSignature)
    }

    /// Check if this error is about the token's shape or alphabet
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            TokenError::MalformedToken { .. } | TokenError::InvalidCharacter(_)
        )
    }

    /// Get the expiration time if this is an expiration error
    pub fn expired_at(&self) -> Option<i64> {
        match self {
            TokenError::TokenExpired { expired_at, .. } => Some(*expired_at),
            _ => None,
        }
    }

    pub(crate) fn malformed<S: Into<String>>(reason: S) -> Self {
        TokenError::MalformedToken {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for TokenError {
    fn from(err: serde_json::Error) -> Self {
        TokenError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for TokenError {
    fn from(err: serde_yaml::Error) -> Self {
        TokenError::Config(err.to_string())
    }
}
