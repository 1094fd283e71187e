//! Secret key derivation and keyed digests.

use crate::error::TokenError;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

/// Length of a derived secret key in bytes.
pub const KEY_LEN: usize = 32;

/// Secret key used to authenticate tokens.
///
/// The key bytes never leave the crate: there is no accessor, and `Debug`
/// output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    bytes: [u8; KEY_LEN],
}

impl SecretKey {
    /// Derive a key from a passphrase (SHA-256 of its UTF-8 bytes).
    ///
    /// The same passphrase always yields the same key.
    pub fn derive(passphrase: &str) -> Self {
        let bytes: [u8; KEY_LEN] = Sha256::digest(passphrase.as_bytes()).into();
        Self { bytes }
    }

    /// Use raw key bytes as-is.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Digest underlying the token HMAC.
///
/// Fixed per deployment; it is never written into the token.
///
/// Identifiers are matched case-insensitively, both by `FromStr` and when
/// deserializing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    /// Identifier of the algorithm (e.g. `"sha256"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// Length of the produced tag in bytes.
    pub fn tag_len(&self) -> usize {
        match self {
            Algorithm::Sha256 => 32,
            Algorithm::Sha384 => 48,
            Algorithm::Sha512 => 64,
        }
    }

    /// Compute the HMAC of `message` under `key`.
    pub(crate) fn mac(&self, key: &SecretKey, message: &[u8]) -> Result<Vec<u8>, TokenError> {
        match self {
            Algorithm::Sha256 => keyed_digest::<Hmac<Sha256>>(key.as_bytes(), message),
            Algorithm::Sha384 => keyed_digest::<Hmac<Sha384>>(key.as_bytes(), message),
            Algorithm::Sha512 => keyed_digest::<Hmac<Sha512>>(key.as_bytes(), message),
        }
    }
}

fn keyed_digest<M: Mac + hmac::digest::KeyInit>(
    key: &[u8],
    message: &[u8],
) -> Result<Vec<u8>, TokenError> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| TokenError::Internal(format!("HMAC key rejected: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(Algorithm::Sha256),
            "sha384" => Ok(Algorithm::Sha384),
            "sha512" => Ok(Algorithm::Sha512),
            other => Err(TokenError::Config(format!("unknown algorithm '{other}'"))),
        }
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic() {
        assert_eq!(SecretKey::derive("s3cr3t"), SecretKey::derive("s3cr3t"));
        assert_ne!(SecretKey::derive("s3cr3t"), SecretKey::derive("s3cr3T"));
    }

    #[test]
    fn test_derive_matches_sha256() {
        // SHA-256("abc")
        let expected = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(SecretKey::derive("abc"), SecretKey::from_bytes(expected));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = SecretKey::from_bytes([7u8; KEY_LEN]);
        assert_eq!(format!("{key:?}"), "SecretKey(<redacted>)");
    }

    #[test]
    fn test_mac_lengths() {
        let key = SecretKey::derive("k");
        for algorithm in [Algorithm::Sha256, Algorithm::Sha384, Algorithm::Sha512] {
            let tag = algorithm.mac(&key, b"message").unwrap();
            assert_eq!(tag.len(), algorithm.tag_len());
        }
    }

    #[test]
    fn test_mac_depends_on_key_and_message() {
        let a = SecretKey::derive("a");
        let b = SecretKey::derive("b");
        let alg = Algorithm::Sha256;
        assert_eq!(alg.mac(&a, b"m").unwrap(), alg.mac(&a, b"m").unwrap());
        assert_ne!(alg.mac(&a, b"m").unwrap(), alg.mac(&b, b"m").unwrap());
        assert_ne!(alg.mac(&a, b"m").unwrap(), alg.mac(&a, b"n").unwrap());
    }

    #[test]
    fn test_algorithm_parse_and_display() {
        assert_eq!("sha256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
        assert_eq!("SHA512".parse::<Algorithm>().unwrap(), Algorithm::Sha512);
        assert!("md5".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::Sha384.to_string(), "sha384");
        assert_eq!(Algorithm::default(), Algorithm::Sha256);
    }

    #[test]
    fn test_algorithm_serde_matches_from_str() {
        for name in ["sha512", "SHA512", "Sha512"] {
            let yaml = serde_yaml::from_str::<Algorithm>(name).unwrap();
            assert_eq!(yaml, name.parse::<Algorithm>().unwrap());
        }
        assert!(serde_yaml::from_str::<Algorithm>("md5").is_err());
        assert_eq!(serde_yaml::to_string(&Algorithm::Sha384).unwrap().trim(), "sha384");
    }
}
