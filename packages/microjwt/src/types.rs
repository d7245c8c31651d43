//! Header, payload and decoded token types

use crate::algorithm::Algorithm;
use crate::error::JwtResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the expiration claim
pub const EXP_CLAIM: &str = "exp";

/// Claims carried in the payload segment
pub type Payload = Map<String, Value>;

/// JWT header structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Algorithm used for signing
    pub alg: Algorithm,
    /// Token type, "JWT" when the header omits it
    #[serde(default = "default_typ")]
    pub typ: String,
}

fn default_typ() -> String {
    Header::TYPE.to_string()
}

impl Header {
    /// Value of the `typ` field
    pub const TYPE: &'static str = "JWT";

    /// Create a header for the given algorithm
    #[must_use]
    pub fn new(alg: Algorithm) -> Self {
        Self {
            alg,
            typ: Self::TYPE.to_string(),
        }
    }
}

/// Header and payload recovered from a verified token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenData {
    /// Decoded header
    pub headers: Header,
    /// Decoded claims, including `exp` when one was set
    pub payload: Payload,
}

impl TokenData {
    /// Deserialize the payload into a typed claims struct.
    ///
    /// # Errors
    /// Returns `JwtError::Encoding` if the payload does not match `T`.
    pub fn claims<T: DeserializeOwned>(&self) -> JwtResult<T> {
        Ok(serde_json::from_value(Value::Object(self.payload.clone()))?)
    }

    /// The `exp` claim, if it is an integer
    #[must_use]
    pub fn expires_at(&self) -> Option<i64> {
        self.payload.get(EXP_CLAIM).and_then(Value::as_i64)
    }
}
