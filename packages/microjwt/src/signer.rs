//! HMAC signing for the `header.payload` message
//!
//! The signature segment is the base64url (unpadded) encoding of the raw HMAC
//! output. Verification recomputes that string and compares it to the token's
//! segment in constant time.

use crate::algorithm::Algorithm;
use crate::base64url;
use crate::error::{JwtError, JwtResult};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::{Choice, ConstantTimeEq};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

#[inline]
fn mac<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|_| JwtError::configuration("invalid HMAC key"))?;
    Mac::update(&mut mac, message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Raw HMAC digest of `message` under `secret`
///
/// # Errors
/// Returns `JwtError::Configuration` if the MAC rejects the key.
pub fn digest(algorithm: Algorithm, secret: &[u8], message: &[u8]) -> JwtResult<Vec<u8>> {
    match algorithm {
        Algorithm::HS256 => mac::<HmacSha256>(secret, message),
        Algorithm::HS384 => mac::<HmacSha384>(secret, message),
        Algorithm::HS512 => mac::<HmacSha512>(secret, message),
    }
}

/// Signature segment for `message`
///
/// # Errors
/// Returns `JwtError::Configuration` if the MAC rejects the key.
pub fn sign(algorithm: Algorithm, secret: &[u8], message: &str) -> JwtResult<String> {
    digest(algorithm, secret, message.as_bytes()).map(base64url::encode)
}

/// Compare `signature` against the expected segment without early exit.
///
/// Returns a [`Choice`] so callers can fold further checks in without
/// branching on the signature result.
///
/// # Errors
/// Returns `JwtError::Configuration` if the MAC rejects the key.
pub fn verify(
    algorithm: Algorithm,
    secret: &[u8],
    message: &str,
    signature: &str,
) -> JwtResult<Choice> {
    let expected = sign(algorithm, secret, message)?;
    Ok(expected.as_bytes().ct_eq(signature.as_bytes()))
}
