//! Keyed-digest signature tags.

use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::policy::SignatureVerifier;

/// The expected signature tag for `bytes` under `key`.
///
/// The tag is the lowercase hex SHA-256 digest of the artifact bytes with the
/// key appended. Every party derives it from the shared key; there is no
/// asymmetric signing and the scheme authenticates nothing against a party
/// who knows the key.
pub fn expected_tag(bytes: &[u8], key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Signature verifier comparing registry-advertised tags against the keyed
/// digest of the downloaded bytes.
///
/// An empty or malformed advertised tag is an ordinary mismatch, not a
/// distinct error.
#[derive(Debug, Clone)]
pub struct KeyedTagVerifier {
    enabled: bool,
    shared_key: String,
}

impl KeyedTagVerifier {
    /// Verifier with the given kill-switch state and shared key.
    pub fn new(enabled: bool, shared_key: impl Into<String>) -> Self {
        Self {
            enabled,
            shared_key: shared_key.into(),
        }
    }

    /// Verifier configured from `verify_signatures` and `shared_key`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.verify_signatures, config.shared_key.clone())
    }
}

impl SignatureVerifier for KeyedTagVerifier {
    fn verify(&self, bytes: &[u8], tag: &str) -> bool {
        if !self.enabled {
            tracing::debug!("signature verification disabled, accepting artifact");
            return true;
        }
        let expected = expected_tag(bytes, &self.shared_key);
        if expected == tag {
            tracing::debug!("signature tag verified");
            true
        } else {
            tracing::warn!(advertised = tag, "signature tag mismatch");
            false
        }
    }
}
