//! Token engine configuration.

use crate::error::TokenError;
use crate::keys::Algorithm;
use serde::{Deserialize, Serialize};

/// Configuration for a token [`Engine`](crate::Engine).
///
/// ```yaml
/// algorithm: sha512
/// default_ttl_secs: 3600
/// ```
///
/// The passphrase is deliberately not part of the configuration; callers
/// pass it to the engine constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TokenConfig {
    /// Digest used for the token HMAC.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Lifetime applied by `Engine::sign_default`. Tokens never expire when unset.
    #[serde(default)]
    pub default_ttl_secs: Option<u64>,
}

impl TokenConfig {
    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TokenError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TokenConfig::default();
        assert_eq!(config.algorithm, Algorithm::Sha256);
        assert_eq!(config.default_ttl_secs, None);

        let config = TokenConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, TokenConfig::default());
    }

    #[test]
    fn test_from_yaml() {
        let config =
            TokenConfig::from_yaml_str("algorithm: sha512\ndefault_ttl_secs: 3600\n").unwrap();
        assert_eq!(config.algorithm, Algorithm::Sha512);
        assert_eq!(config.default_ttl_secs, Some(3600));
    }

    #[test]
    fn test_algorithm_case_insensitive() {
        let config = TokenConfig::from_yaml_str("algorithm: SHA384").unwrap();
        assert_eq!(config.algorithm, Algorithm::Sha384);
    }

    #[test]
    fn test_unknown_algorithm_is_config_error() {
        let err = TokenConfig::from_yaml_str("algorithm: md5").unwrap_err();
        assert!(matches!(err, TokenError::Config(_)));
    }
}
