//! Codec: encode, verify and decode signed tokens
//!
//! A [`Codec`] owns a secret, an [`Algorithm`] and a [`Clock`]. None of them
//! change after construction, so a single codec can be shared by reference or
//! behind an `Arc` across threads and tasks.

use crate::algorithm::Algorithm;
use crate::base64url;
use crate::builder::CodecBuilder;
use crate::clock::{Clock, SystemClock};
use crate::error::{JwtError, JwtResult};
use crate::framing::{self, Segments};
use crate::secret::SecretKey;
use crate::signer;
use crate::types::{EXP_CLAIM, Header, Payload, TokenData};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use subtle::Choice;

/// HMAC token codec.
#[derive(Clone)]
pub struct Codec<C = SystemClock> {
    secret: SecretKey,
    algorithm: Algorithm,
    clock: C,
}

impl Codec<SystemClock> {
    /// Create a codec reading the system clock.
    ///
    /// # Errors
    /// Returns `JwtError::Configuration` if the secret is empty.
    pub fn new(secret: impl AsRef<[u8]>, algorithm: Algorithm) -> JwtResult<Self> {
        Ok(Self::from_parts(
            SecretKey::new(secret)?,
            algorithm,
            SystemClock,
        ))
    }

    /// Start a builder
    #[must_use]
    pub fn builder() -> CodecBuilder {
        CodecBuilder::new()
    }
}

impl<C: Clock> Codec<C> {
    pub(crate) fn from_parts(secret: SecretKey, algorithm: Algorithm, clock: C) -> Self {
        if !secret.is_strong_for(algorithm) {
            tracing::warn!(
                %algorithm,
                secret_len = secret.len(),
                recommended = algorithm.recommended_key_size(),
                "HMAC secret is shorter than recommended"
            );
        }
        Self {
            secret,
            algorithm,
            clock,
        }
    }

    /// Replace the time source, keeping secret and algorithm
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Codec<C2> {
        Codec {
            secret: self.secret,
            algorithm: self.algorithm,
            clock,
        }
    }

    /// Algorithm fixed at construction
    #[inline]
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign `payload` into a three-segment token.
    ///
    /// When `expiration` is a positive number of seconds, an `exp` claim of
    /// `now + expiration` is written into a copy of the payload, replacing any
    /// `exp` the caller supplied.
    ///
    /// # Errors
    /// Returns `JwtError::Encoding` if the payload is not a JSON object or the
    /// expiry overflows.
    pub fn encode<P>(&self, payload: &P, expiration: Option<u64>) -> JwtResult<String>
    where
        P: Serialize + ?Sized,
    {
        let mut claims = match serde_json::to_value(payload)? {
            Value::Object(map) => map,
            other => {
                return Err(JwtError::encoding(format!(
                    "payload must serialize to a JSON object, got {}",
                    json_kind(&other)
                )));
            }
        };

        let expires = expiration.filter(|seconds| *seconds > 0);
        if let Some(seconds) = expires {
            claims.insert(EXP_CLAIM.to_string(), Value::from(self.expiry_after(seconds)?));
        }

        let header_segment = base64url::encode(serde_json::to_vec(&Header::new(self.algorithm))?);
        let payload_segment = base64url::encode(serde_json::to_vec(&claims)?);
        let message = framing::signing_input(&header_segment, &payload_segment);
        let signature = signer::sign(self.algorithm, self.secret.expose(), &message)?;

        tracing::trace!(algorithm = %self.algorithm, expires = expires.is_some(), "token encoded");
        Ok(framing::join(message, &signature))
    }

    /// Whether `token` carries a valid signature, names this codec's
    /// algorithm in its header and has not expired.
    ///
    /// Never fails: malformed or undecodable input is simply invalid.
    #[must_use]
    pub fn verify(&self, token: &str) -> bool {
        self.check(token).is_ok()
    }

    /// Verify `token`, reporting why it was rejected.
    ///
    /// # Errors
    /// Returns `JwtError::MalformedToken` for a wrong segment count and
    /// `JwtError::InvalidToken` for every other rejection.
    pub fn check(&self, token: &str) -> JwtResult<()> {
        let segments = Segments::split(token).map_err(|err| {
            tracing::debug!(error = %err, "token rejected: bad framing");
            err
        })?;
        self.check_segments(&segments)
    }

    /// Verify `token` and return its header and payload.
    ///
    /// # Errors
    /// Returns `JwtError::MalformedToken` for a wrong segment count,
    /// `JwtError::InvalidToken` if verification fails, and
    /// `JwtError::Encoding` if a verified segment cannot be parsed.
    pub fn decode(&self, token: &str) -> JwtResult<TokenData> {
        let segments = Segments::split(token)?;
        self.check_segments(&segments)?;

        let headers: Header = serde_json::from_slice(&base64url::decode(segments.header)?)?;
        let payload: Payload = serde_json::from_slice(&base64url::decode(segments.payload)?)?;
        Ok(TokenData { headers, payload })
    }

    fn check_segments(&self, segments: &Segments<'_>) -> JwtResult<()> {
        let signature_ok = signer::verify(
            self.algorithm,
            self.secret.expose(),
            &segments.signing_input(),
            segments.signature,
        )?;
        let header_ok = Choice::from(u8::from(self.header_matches(segments.header)));
        let fresh = Choice::from(u8::from(self.is_fresh(segments.payload)));

        if bool::from(signature_ok & header_ok & fresh) {
            Ok(())
        } else {
            tracing::debug!(algorithm = %self.algorithm, "token rejected: signature, header or expiry");
            Err(JwtError::InvalidToken)
        }
    }

    /// Header decodes and names the algorithm this codec signs with
    fn header_matches(&self, header_segment: &str) -> bool {
        base64url::decode(header_segment)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Header>(&bytes).ok())
            .is_some_and(|header| header.alg == self.algorithm)
    }

    /// Payload decodes to a JSON object whose `exp`, if any, is still ahead
    fn is_fresh(&self, payload_segment: &str) -> bool {
        let Ok(bytes) = base64url::decode(payload_segment) else {
            return false;
        };
        let Ok(claims) = serde_json::from_slice::<Payload>(&bytes) else {
            return false;
        };
        match claims.get(EXP_CLAIM) {
            None => true,
            Some(exp) => not_yet_reached(self.clock.now(), exp),
        }
    }

    fn expiry_after(&self, seconds: u64) -> JwtResult<i64> {
        i64::try_from(seconds)
            .ok()
            .and_then(|seconds| self.clock.now().checked_add(seconds))
            .ok_or_else(|| JwtError::encoding(format!("expiration of {seconds}s is out of range")))
    }
}

impl<C> fmt::Debug for Codec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("algorithm", &self.algorithm)
            .field("secret", &self.secret)
            .finish_non_exhaustive()
    }
}

/// `now < exp`; non-numeric `exp` never passes
fn not_yet_reached(now: i64, exp: &Value) -> bool {
    if let Some(exp) = exp.as_i64() {
        now < exp
    } else if let Some(exp) = exp.as_f64() {
        (now as f64) < exp
    } else {
        false
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000;

    fn codec(alg: Algorithm) -> Codec<FixedClock> {
        Codec::new("adamngoodsecret", alg)
            .expect("codec")
            .with_clock(FixedClock(NOW))
    }

    #[test]
    fn encode_injects_exp_only_for_positive_expiration() {
        let codec = codec(Algorithm::HS256);
        for (expiration, expected) in [(None, None), (Some(0), None), (Some(60), Some(NOW + 60))] {
            let token = codec.encode(&json!({"u": "x"}), expiration).expect("encode");
            let data = codec.decode(&token).expect("decode");
            assert_eq!(data.expires_at(), expected);
        }
    }

    #[test]
    fn encode_overwrites_caller_exp_without_touching_original() {
        let codec = codec(Algorithm::HS256);
        let payload = json!({"u": "x", "exp": 5});
        let token = codec.encode(&payload, Some(10)).expect("encode");
        assert_eq!(payload["exp"], 5);
        assert_eq!(codec.decode(&token).expect("decode").expires_at(), Some(NOW + 10));
    }

    #[test]
    fn encode_rejects_non_object_payloads() {
        let codec = codec(Algorithm::HS256);
        for payload in [json!(null), json!([1, 2]), json!("text"), json!(3)] {
            assert!(matches!(
                codec.encode(&payload, None),
                Err(JwtError::Encoding(_))
            ));
        }
    }

    #[test]
    fn encode_rejects_non_string_keys() {
        let codec = codec(Algorithm::HS256);
        let mut payload = std::collections::BTreeMap::new();
        payload.insert((1, 2), "tuple keys are not JSON");
        assert!(matches!(
            codec.encode(&payload, None),
            Err(JwtError::Encoding(_))
        ));
    }

    #[test]
    fn encode_rejects_overflowing_expiration() {
        let codec = codec(Algorithm::HS256);
        for expiration in [u64::MAX, i64::MAX as u64] {
            assert!(matches!(
                codec.encode(&json!({}), Some(expiration)),
                Err(JwtError::Encoding(_))
            ));
        }
    }

    #[test]
    fn expiry_is_strict() {
        let issuer = codec(Algorithm::HS256);
        let token = issuer.encode(&json!({"u": "x"}), Some(1)).expect("encode");
        assert!(issuer.verify(&token));
        assert!(!issuer.clone().with_clock(FixedClock(NOW + 1)).verify(&token));
        assert!(!issuer.with_clock(FixedClock(NOW + 2)).verify(&token));
    }

    #[test]
    fn expired_and_tampered_share_one_error() {
        let issuer = codec(Algorithm::HS256);
        let token = issuer.encode(&json!({"u": "x"}), Some(1)).expect("encode");
        let later = issuer.clone().with_clock(FixedClock(NOW + 5));
        assert_eq!(later.check(&token), Err(JwtError::InvalidToken));

        let forged = format!("{}x", token);
        assert_eq!(issuer.check(&forged), Err(JwtError::InvalidToken));
        assert_eq!(issuer.decode(&forged), Err(JwtError::InvalidToken));
    }

    #[test]
    fn malformed_framing_is_reported_by_check_and_decode() {
        let codec = codec(Algorithm::HS256);
        assert_eq!(
            codec.check("a.b"),
            Err(JwtError::MalformedToken { segments: 2 })
        );
        assert_eq!(
            codec.decode("not-a-token"),
            Err(JwtError::MalformedToken { segments: 1 })
        );
        assert!(!codec.verify("a.b"));
        assert!(!codec.verify("a.b.c.d"));
    }

    #[test]
    fn signed_garbage_payload_is_invalid() {
        let codec = codec(Algorithm::HS256);
        let header = base64url::encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        for payload in ["!!!", "bnVsbA", "WzFd"] {
            // "bnVsbA" is `null`, "WzFd" is `[1]`
            let token = signed(Algorithm::HS256, &header, payload);
            assert!(!codec.verify(&token), "{payload} should be rejected");
        }
    }

    /// Token with hand-picked segments and a correct HS signature
    fn signed(alg: Algorithm, header: &str, payload: &str) -> String {
        let message = framing::signing_input(header, payload);
        let sig = signer::sign(alg, b"adamngoodsecret", &message).expect("sign");
        framing::join(message, &sig)
    }

    #[test]
    fn header_without_typ_decodes_as_jwt() {
        let codec = codec(Algorithm::HS256);
        let token = signed(
            Algorithm::HS256,
            &base64url::encode(br#"{"alg":"HS256"}"#),
            &base64url::encode(br#"{"u":"x"}"#),
        );
        assert!(codec.verify(&token));
        let data = codec.decode(&token).expect("decode");
        assert_eq!(data.headers, Header::new(Algorithm::HS256));
        assert_eq!(data.payload["u"], "x");
    }

    #[test]
    fn header_alg_must_match_codec() {
        let codec = codec(Algorithm::HS256);
        let payload = base64url::encode(br#"{"u":"x"}"#);
        for header in [
            br#"{"alg":"HS512","typ":"JWT"}"#.as_slice(),
            br#"{"alg":"none","typ":"JWT"}"#.as_slice(),
            br#"{"typ":"JWT"}"#.as_slice(),
            b"{}".as_slice(),
        ] {
            let token = signed(Algorithm::HS256, &base64url::encode(header), &payload);
            assert!(!codec.verify(&token));
            assert_eq!(codec.check(&token), Err(JwtError::InvalidToken));
            assert_eq!(codec.decode(&token), Err(JwtError::InvalidToken));
        }

        let token = signed(
            Algorithm::HS256,
            &base64url::encode(br#"{"alg":"HS256","typ":"JWT"}"#),
            &payload,
        );
        assert!(codec.verify(&token));
    }

    #[test]
    fn non_numeric_exp_is_invalid() {
        let codec = codec(Algorithm::HS256);
        let token = codec
            .encode(&json!({"exp": "tomorrow"}), None)
            .expect("encode");
        assert!(!codec.verify(&token));

        let token = codec.encode(&json!({"exp": NOW as f64 + 0.5}), None).expect("encode");
        assert!(codec.verify(&token));
    }

    #[test]
    fn debug_hides_secret() {
        let printed = format!("{:?}", codec(Algorithm::HS384));
        assert!(printed.contains("HS384"));
        assert!(!printed.contains("adamngoodsecret"));
    }

    #[test]
    fn codec_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Codec>();
        assert_send_sync::<Codec<FixedClock>>();
    }
}
