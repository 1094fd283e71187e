//! Error types for the codec.

use thiserror::Error;

/// Errors that can occur while decoding base-62 text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The input holds a character outside the codec alphabet.
    #[error("invalid base-62 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
}
