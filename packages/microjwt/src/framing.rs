//! Token framing: `header.payload.signature`

use crate::error::{JwtError, JwtResult};

/// Segment separator
pub const SEPARATOR: char = '.';

/// Borrowed view over the three segments of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Base64url header segment
    pub header: &'a str,
    /// Base64url payload segment
    pub payload: &'a str,
    /// Signature segment
    pub signature: &'a str,
}

impl<'a> Segments<'a> {
    /// Split a token into exactly three segments.
    ///
    /// # Errors
    /// Returns `JwtError::MalformedToken` when the segment count is not three.
    pub fn split(token: &'a str) -> JwtResult<Self> {
        let parts: Vec<&'a str> = token.split(SEPARATOR).collect();
        match parts[..] {
            [header, payload, signature] => Ok(Self {
                header,
                payload,
                signature,
            }),
            _ => Err(JwtError::MalformedToken {
                segments: parts.len(),
            }),
        }
    }

    /// The exact string the signature is computed over
    #[must_use]
    pub fn signing_input(&self) -> String {
        signing_input(self.header, self.payload)
    }
}

/// Join header and payload segments into the signed message
#[inline]
#[must_use]
pub fn signing_input(header: &str, payload: &str) -> String {
    let mut message = String::with_capacity(header.len() + payload.len() + 1);
    message.push_str(header);
    message.push(SEPARATOR);
    message.push_str(payload);
    message
}

/// Append the signature segment to a signed message
#[inline]
#[must_use]
pub fn join(mut signing_input: String, signature: &str) -> String {
    signing_input.reserve(signature.len() + 1);
    signing_input.push(SEPARATOR);
    signing_input.push_str(signature);
    signing_input
}
