//! Error types for activity operations

use thiserror::Error;

/// Errors surfaced by activity coercion and derivation
#[derive(Debug, Error)]
pub enum ActivityError {
    /// A routing relationship (from, recipient, conversation) is absent
    #[error("missing routing field: {0}")]
    MissingRouting(&'static str),

    /// Channel data could not be coerced into the requested shape
    #[error("channel data coercion failed: {0}")]
    ChannelData(#[source] serde_json::Error),

    /// A mention entity did not carry a valid mention payload
    #[error("malformed mention entity: {0}")]
    Mention(#[source] serde_json::Error),

    /// Wire data is not a valid activity
    #[error("activity decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// Activity could not be written to wire form
    #[error("activity encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Mention text could not be compiled into a matcher
    #[error("mention text matcher: {0}")]
    Pattern(#[from] regex::Error),
}
