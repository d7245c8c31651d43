//! Codec builder - configuration entry point
//!
//! Collects a secret, an algorithm (by value or by name) and an optional
//! clock, and validates all of them in [`CodecBuilder::build`].

use crate::algorithm::Algorithm;
use crate::clock::{Clock, SystemClock};
use crate::codec::Codec;
use crate::error::{JwtError, JwtResult};
use crate::secret::SecretKey;
use zeroize::Zeroizing;

/// Builder for [`Codec`]
pub struct CodecBuilder<C = SystemClock> {
    secret: Option<Zeroizing<Vec<u8>>>,
    algorithm: Option<String>,
    clock: C,
}

impl CodecBuilder {
    /// Create new builder with the system clock and HS256 default
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            secret: None,
            algorithm: None,
            clock: SystemClock,
        }
    }
}

impl Default for CodecBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CodecBuilder<C> {
    /// Set the HMAC secret
    #[inline]
    #[must_use]
    pub fn with_secret(mut self, secret: impl AsRef<[u8]>) -> Self {
        self.secret = Some(Zeroizing::new(secret.as_ref().to_vec()));
        self
    }

    /// Set the algorithm, either as [`Algorithm`] or by header name
    #[inline]
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: impl AsRef<str>) -> Self {
        self.algorithm = Some(algorithm.as_ref().to_string());
        self
    }

    /// Set the time source used for `exp`
    #[inline]
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> CodecBuilder<C2> {
        CodecBuilder {
            secret: self.secret,
            algorithm: self.algorithm,
            clock,
        }
    }

    /// Validate the configuration and create the codec.
    ///
    /// # Errors
    /// Returns `JwtError::Configuration` if the secret is missing or empty, or
    /// the algorithm name is not supported.
    pub fn build(self) -> JwtResult<Codec<C>> {
        let algorithm = match self.algorithm.as_deref() {
            Some(name) => name.parse::<Algorithm>()?,
            None => Algorithm::default(),
        };
        let secret = self
            .secret
            .ok_or_else(|| JwtError::configuration("secret is required"))?;
        let secret = SecretKey::new(secret.as_slice())?;
        Ok(Codec::from_parts(secret, algorithm, self.clock))
    }
}
