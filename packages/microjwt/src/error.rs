//! JWT codec error types

use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors surfaced by the codec.
///
/// Expired and tampered tokens both map to [`JwtError::InvalidToken`]; callers
/// cannot tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Codec could not be configured (empty secret, unknown algorithm name)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Payload or segment could not be serialized, parsed or base64-decoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Token does not have exactly three dot-separated segments
    #[error("Malformed token: expected 3 segments, got {segments}")]
    MalformedToken {
        /// Number of segments found
        segments: usize,
    },

    /// Signature mismatch or expired token
    #[error("Invalid token")]
    InvalidToken,
}

impl JwtError {
    /// Create a configuration error
    #[inline]
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        JwtError::Configuration(msg.into())
    }

    /// Create an encoding error
    #[inline]
    #[must_use]
    pub fn encoding(msg: impl Into<String>) -> Self {
        JwtError::Encoding(msg.into())
    }
}

impl From<serde_json::Error> for JwtError {
    fn from(err: serde_json::Error) -> Self {
        JwtError::Encoding(err.to_string())
    }
}

impl From<base64::DecodeError> for JwtError {
    fn from(err: base64::DecodeError) -> Self {
        JwtError::Encoding(err.to_string())
    }
}
