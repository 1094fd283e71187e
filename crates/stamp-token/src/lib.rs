//! # stamp-token
//!
//! Self-contained, tamper-evident bearer tokens for application backends.
//!
//! A token carries an arbitrary JSON payload and an optional expiry. All the
//! state needed to validate it travels inside the token, protected by an HMAC
//! keyed with a secret derived from the application passphrase. Nothing is
//! stored server-side.
//!
//! ## Token Format
//!
//! ```text
//! <base62(envelope json)>.<base62(hmac(envelope json))>
//! ```
//!
//! | Envelope field | Meaning | Present |
//! |----------------|---------|---------|
//! | `d` | Application payload | Always |
//! | `e` | Expiry, epoch seconds | Only for TTL-bound tokens |
//!
//! The payload is **not encrypted**: anyone holding the token can read it.
//! Only integrity and expiration are guaranteed.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use stamp_token::Engine;
//!
//! let engine = Engine::new("s3cr3t");
//! let token = engine.sign(&json!({"bar": true})).unwrap();
//! assert_eq!(engine.verify(&token).unwrap(), json!({"bar": true}));
//! ```

pub mod clock;
pub mod config;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod token;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::TokenConfig;
pub use envelope::Envelope;
pub use error::TokenError;
pub use keys::{Algorithm, SecretKey};
pub use token::{Engine, SEPARATOR, inspect_unverified};

pub use stamp_codec::CodecError;
