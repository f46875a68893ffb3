//! Digest-derived entropy gate.

use std::f64::consts::PI;

use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::policy::IntegrityGate;

/// Resonance threshold below which an artifact is rejected.
pub const ENTROPY_THRESHOLD: f64 = 0.31415;

/// Integrity gate that scores artifacts by a digest-derived resonance value.
///
/// The score is a deterministic function of the artifact's SHA-256 digest:
/// the leading eight digest bytes are reduced to a value in `[0, 1)` and
/// mapped through `|sin(pi * x)|`. Artifacts scoring below
/// [`ENTROPY_THRESHOLD`] are rejected. This is a policy gate over well-formed
/// content, not a security boundary: it detects nothing an adversary could
/// not also produce, and it exists to keep degenerate artifacts out of the
/// store.
#[derive(Debug, Clone)]
pub struct EntropyGate {
    enabled: bool,
}

impl EntropyGate {
    /// Gate with the given kill-switch state.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Gate configured from `integrity_validation_enabled`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.integrity_validation_enabled)
    }

    /// The resonance score for the given bytes, in `[0, 1]`.
    pub fn resonance(bytes: &[u8]) -> f64 {
        let digest = Sha256::digest(bytes);
        let mut lead = [0u8; 8];
        lead.copy_from_slice(&digest[..8]);
        let value = u64::from_be_bytes(lead);
        let normalized = (value % 10_000) as f64 / 10_000.0;
        (PI * normalized).sin().abs()
    }
}

impl IntegrityGate for EntropyGate {
    fn accept(&self, bytes: &[u8]) -> bool {
        if !self.enabled {
            tracing::debug!("integrity gate disabled, accepting artifact");
            return true;
        }
        let score = Self::resonance(bytes);
        if score >= ENTROPY_THRESHOLD {
            tracing::debug!(score, "artifact passed integrity gate");
            true
        } else {
            tracing::warn!(score, threshold = ENTROPY_THRESHOLD, "artifact rejected by integrity gate");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Scores precomputed from the SHA-256 digests of the fixture payloads.

    #[test]
    fn resonance_is_deterministic() {
        let bytes = b"keg demo payload\n";
        assert_eq!(EntropyGate::resonance(bytes), EntropyGate::resonance(bytes));
    }

    #[test]
    fn empty_input_scores_above_threshold() {
        // SHA-256("") leads with e3b0c44298fc1c14; resonance ~= 0.4960.
        let score = EntropyGate::resonance(b"");
        assert!((score - 0.496_004_347_874).abs() < 1e-9);
        assert!(EntropyGate::new(true).accept(b""));
    }

    #[test]
    fn high_resonance_payload_is_accepted() {
        // resonance ~= 0.9735
        let score = EntropyGate::resonance(b"keg demo payload\n");
        assert!((score - 0.973_531_055_826).abs() < 1e-9);
        assert!(EntropyGate::new(true).accept(b"keg demo payload\n"));
    }

    #[test]
    fn low_resonance_payload_is_rejected() {
        // resonance ~= 0.0832
        let score = EntropyGate::resonance(b"payload");
        assert!((score - 0.083_156_069_445).abs() < 1e-9);
        assert!(!EntropyGate::new(true).accept(b"payload"));
    }

    #[test]
    fn disabled_gate_accepts_everything() {
        assert!(EntropyGate::new(false).accept(b"payload"));
        assert!(EntropyGate::new(false).accept(b""));
    }

    #[test]
    fn from_config_honors_the_kill_switch() {
        let config = Config {
            integrity_validation_enabled: false,
            ..Config::default()
        };
        assert!(EntropyGate::from_config(&config).accept(b"payload"));
    }
}
