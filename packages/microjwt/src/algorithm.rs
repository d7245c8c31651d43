//! HMAC algorithm selection

use crate::error::JwtError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symmetric signing algorithm written into the `alg` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// HMAC using SHA-256
    #[default]
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
}

impl Algorithm {
    /// Every supported algorithm, weakest first
    pub const ALL: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

    /// Header `alg` value
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
        }
    }

    /// Name of the underlying hash function
    #[inline]
    #[must_use]
    pub const fn hash_name(self) -> &'static str {
        match self {
            Algorithm::HS256 => "SHA-256",
            Algorithm::HS384 => "SHA-384",
            Algorithm::HS512 => "SHA-512",
        }
    }

    /// Length in bytes of the raw HMAC output
    #[inline]
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Algorithm::HS256 => 32,
            Algorithm::HS384 => 48,
            Algorithm::HS512 => 64,
        }
    }

    /// Secrets shorter than this are accepted but logged as weak
    #[inline]
    #[must_use]
    pub const fn recommended_key_size(self) -> usize {
        self.digest_len()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl AsRef<str> for Algorithm {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(JwtError::configuration(format!(
                "unsupported algorithm: {other}"
            ))),
        }
    }
}
