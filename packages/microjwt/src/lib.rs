//! Compact HMAC-signed JSON Web Tokens
//!
//! This crate provides a small JWT codec with:
//! - HS256, HS384 and HS512 signing
//! - Optional `exp` injection and enforcement
//! - Constant-time signature comparison
//! - Secrets zeroed on drop
//!
//! Tokens are plain strings of the form
//! `base64url(header).base64url(payload).base64url(hmac)`. The header is always
//! `{"alg":"<HS256|HS384|HS512>","typ":"JWT"}` and all three segments use the
//! unpadded URL-safe base64 alphabet.
//!
//! ```
//! use cryypt_microjwt::{Algorithm, Codec};
//! use serde_json::json;
//!
//! let codec = Codec::new("adamngoodsecret", Algorithm::HS256)?;
//! let token = codec.encode(&json!({"username": "johndoe"}), Some(24 * 60 * 60))?;
//!
//! assert!(codec.verify(&token));
//! let data = codec.decode(&token)?;
//! assert_eq!(data.payload["username"], "johndoe");
//! assert!(data.expires_at().is_some());
//! # Ok::<(), cryypt_microjwt::JwtError>(())
//! ```

pub mod base64url;
pub mod framing;
pub mod signer;

mod algorithm;
mod builder;
mod clock;
mod codec;
mod error;
mod secret;
mod types;

pub use algorithm::Algorithm;
pub use builder::CodecBuilder;
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::Codec;
pub use error::*;
pub use secret::SecretKey;
pub use types::{EXP_CLAIM, Header, Payload, TokenData};
