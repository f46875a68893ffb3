//! Acceptance policies applied to downloaded artifacts.
//!
//! Two checks sit between download and extraction: an integrity gate over the
//! artifact bytes and a signature-tag verification against the registry
//! metadata. Both are trait seams so the installer can be exercised with
//! custom policies in tests, and both honor their respective kill switches in
//! the configuration document.

pub mod entropy;
pub mod keyed_tag;

pub use entropy::EntropyGate;
pub use keyed_tag::{expected_tag, KeyedTagVerifier};

/// Accept or reject artifact bytes before they are staged for install.
pub trait IntegrityGate {
    /// `true` if the artifact passes the gate.
    fn accept(&self, bytes: &[u8]) -> bool;
}

/// Verify an artifact against the signature tag advertised by the registry.
pub trait SignatureVerifier {
    /// `true` if `tag` is valid for `bytes`.
    fn verify(&self, bytes: &[u8], tag: &str) -> bool;
}
