//! Base64 URL-safe transform shared by every token segment
//!
//! Encoding uses the `-`/`_` alphabet without `=` padding. Decoding restores
//! the padding before handing the input to the strict URL-safe engine, so both
//! padded and unpadded input are accepted.

use crate::error::JwtResult;
use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};

/// Base64 URL-safe encoding without padding (RFC 7515)
#[inline]
#[must_use]
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding, tolerant of stripped padding
///
/// # Errors
/// Returns `JwtError::Encoding` if the input is not valid base64url.
pub fn decode(input: &str) -> JwtResult<Vec<u8>> {
    let padding = (4 - input.len() % 4) % 4;
    let mut padded = String::with_capacity(input.len() + padding);
    padded.push_str(input);
    padded.extend(std::iter::repeat('=').take(padding));
    Ok(URL_SAFE.decode(padded)?)
}
