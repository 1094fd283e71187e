//! Token signing and verification.

use crate::clock::{Clock, SystemClock};
use crate::config::TokenConfig;
use crate::envelope::Envelope;
use crate::error::TokenError;
use crate::keys::{Algorithm, SecretKey};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use subtle::ConstantTimeEq;

/// Character joining the envelope and tag segments. Not part of the codec alphabet.
pub const SEPARATOR: char = '.';

/// Signs and verifies tokens under one secret.
///
/// The engine holds no mutable state, so a single instance can be shared
/// across threads. Every operation reads the clock once.
#[derive(Debug, Clone)]
pub struct Engine<C = SystemClock> {
    key: SecretKey,
    algorithm: Algorithm,
    default_ttl_secs: Option<u64>,
    clock: C,
}

impl Engine {
    /// Create an engine keyed by `secret`, using HMAC-SHA256.
    pub fn new(secret: &str) -> Self {
        Self::from_key(SecretKey::derive(secret), Algorithm::Sha256)
    }

    /// Create an engine keyed by `secret` with the given configuration.
    pub fn with_config(secret: &str, config: &TokenConfig) -> Self {
        let mut engine = Self::from_key(SecretKey::derive(secret), config.algorithm);
        engine.default_ttl_secs = config.default_ttl_secs;
        engine
    }

    /// Create an engine from an already derived key.
    pub fn from_key(key: SecretKey, algorithm: Algorithm) -> Self {
        Self {
            key,
            algorithm,
            default_ttl_secs: None,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> Engine<C> {
    /// Replace the clock used for expiry handling.
    pub fn with_clock<K: Clock>(self, clock: K) -> Engine<K> {
        Engine {
            key: self.key,
            algorithm: self.algorithm,
            default_ttl_secs: self.default_ttl_secs,
            clock,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign a payload into a token that never expires.
    pub fn sign<T: Serialize + ?Sized>(&self, payload: &T) -> Result<String, TokenError> {
        let envelope = Envelope::new(serde_json::to_value(payload)?);
        self.seal(&envelope)
    }

    /// Sign a payload into a token valid for `ttl_secs` seconds.
    ///
    /// The expiry is the current whole second plus `ttl_secs`; the sub-second
    /// part of the current time is discarded.
    pub fn sign_with_ttl<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        ttl_secs: u64,
    ) -> Result<String, TokenError> {
        let payload = serde_json::to_value(payload)?;
        self.sign_value_at(payload, ttl_secs, self.now())
    }

    /// Sign with the configured default lifetime, or without expiry when none is set.
    pub fn sign_default<T: Serialize + ?Sized>(&self, payload: &T) -> Result<String, TokenError> {
        match self.default_ttl_secs {
            Some(ttl_secs) => self.sign_with_ttl(payload, ttl_secs),
            None => self.sign(payload),
        }
    }

    /// Verify a token and return its payload.
    ///
    /// Checks, in order: the `<envelope>.<tag>` shape, the envelope alphabet,
    /// the tag, the envelope structure and finally the expiry. A token whose
    /// expiry equals the current second is still valid.
    pub fn verify(&self, token: &str) -> Result<Value, TokenError> {
        self.verify_at(token, self.now())
    }

    /// Verify a token and deserialize its payload into `T`.
    pub fn verify_as<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let payload = self.verify(token)?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Verify a token and sign its payload again with a fresh lifetime.
    ///
    /// The new expiry counts from now; the original expiry is dropped.
    pub fn resign(&self, token: &str, ttl_secs: u64) -> Result<String, TokenError> {
        let now = self.now();
        let payload = self.verify_at(token, now)?;
        self.sign_value_at(payload, ttl_secs, now)
    }

    fn now(&self) -> i64 {
        self.clock.now().timestamp()
    }

    fn sign_value_at(&self, payload: Value, ttl_secs: u64, now: i64) -> Result<String, TokenError> {
        let ttl = i64::try_from(ttl_secs)
            .map_err(|_| TokenError::Config(format!("ttl of {ttl_secs}s is out of range")))?;
        let expires_at = now
            .checked_add(ttl)
            .ok_or_else(|| TokenError::Config(format!("ttl of {ttl_secs}s is out of range")))?;
        self.seal(&Envelope::expiring(payload, expires_at))
    }

    fn seal(&self, envelope: &Envelope) -> Result<String, TokenError> {
        let bytes = envelope.to_bytes()?;
        let tag = self.algorithm.mac(&self.key, &bytes)?;

        tracing::debug!(
            algorithm = %self.algorithm,
            expires_at = ?envelope.expires_at(),
            len = bytes.len(),
            "Signed token"
        );

        Ok(format!(
            "{}{SEPARATOR}{}",
            stamp_codec::encode(&bytes),
            stamp_codec::encode(&tag)
        ))
    }

    fn verify_at(&self, token: &str, now: i64) -> Result<Value, TokenError> {
        let result = self.check(token, now);
        if let Err(err) = &result {
            tracing::debug!(algorithm = %self.algorithm, error = %err, "Rejected token");
        }
        result
    }

    fn check(&self, token: &str, now: i64) -> Result<Value, TokenError> {
        let (packed, tag) = split_token(token)?;
        let bytes = stamp_codec::decode(packed)?;

        // The tag covers the envelope bytes, never the encoded text.
        let expected = stamp_codec::encode(&self.algorithm.mac(&self.key, &bytes)?);
        if !bool::from(expected.as_bytes().ct_eq(tag.as_bytes())) {
            return Err(TokenError::InvalidSignature);
        }

        let envelope = Envelope::from_bytes(&bytes)?;
        if let Some(expired_at) = envelope.expires_at().filter(|&expires_at| expires_at < now) {
            return Err(TokenError::TokenExpired {
                expired_at,
                current_time: now,
            });
        }

        Ok(envelope.into_payload())
    }
}

/// Decode the envelope of a token without checking its tag or expiry.
///
/// The result is untrusted: anyone can build a token that inspects cleanly.
/// Use it for debugging only, never for authorization.
pub fn inspect_unverified(token: &str) -> Result<Envelope, TokenError> {
    let (packed, _) = split_token(token)?;
    Envelope::from_bytes(&stamp_codec::decode(packed)?)
}

fn split_token(token: &str) -> Result<(&str, &str), TokenError> {
    let mut parts = token.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(packed), Some(tag), None) if !packed.is_empty() && !tag.is_empty() => {
            Ok((packed, tag))
        }
        (_, _, None) => Err(TokenError::malformed(format!(
            "expected two non-empty segments separated by '{SEPARATOR}'"
        ))),
        _ => Err(TokenError::malformed(format!(
            "more than one '{SEPARATOR}' separator"
        ))),
    }
}
