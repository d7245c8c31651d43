//! Secret key material held by the codec

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use std::fmt;
use zeroize::Zeroizing;

/// HMAC secret that is wiped from memory on drop and never printed.
#[derive(Clone)]
pub struct SecretKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl SecretKey {
    /// Copy `secret` into a zeroizing buffer.
    ///
    /// # Errors
    /// Returns `JwtError::Configuration` if the secret is empty.
    pub fn new(secret: impl AsRef<[u8]>) -> JwtResult<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(JwtError::configuration("secret must not be empty"));
        }
        Ok(Self {
            bytes: Zeroizing::new(secret.to_vec()),
        })
    }

    /// Secret length in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; empty secrets are rejected at construction
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the secret meets the recommended length for `algorithm`
    #[inline]
    #[must_use]
    pub fn is_strong_for(&self, algorithm: Algorithm) -> bool {
        self.len() >= algorithm.recommended_key_size()
    }

    #[inline]
    pub(crate) fn expose(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}
