//! keg - a small local package manager
//!
//! keg installs opaque package artifacts from an HTTP registry: resolve
//! metadata, download, run the acceptance gates, extract, and record the
//! install in a durable state document.
//!
//! # Overview
//!
//! Every mutating operation is a full pipeline ending in an atomic rewrite
//! of the state document, so the recorded state is always internally
//! consistent. Validation is policy, not security: the integrity gate and
//! signature tags keep malformed artifacts out of the store but authenticate
//! nothing against an adversary.
//!
//! # Architecture
//!
//! - **Typestate Pattern**: The installation flow uses `UnresolvedPackage` →
//!   `ResolvedPackage` → `FetchedArtifact` → `VettedArtifact` →
//!   `ClearedArtifact` → `StagedInstall` to enforce correct ordering at
//!   compile time.
//! - **Trait Seams**: `Registry`, `IntegrityGate`, and `SignatureVerifier`
//!   keep the pipeline testable without a network or real artifacts.
//! - **Newtypes**: `PackageName` and `Version` provide type-safe identifiers.
//!
//! # Directory Layout
//!
//! ```text
//! ~/.keg/
//! ├── config.json   # Configuration + installed-package state document
//! ├── config.lock   # Advisory lock for state mutations
//! ├── packages/     # One directory per installed package
//! └── cache/        # Downloaded artifacts (<name>.keg)
//! ```

pub mod cmd;
pub mod config;
pub mod ops;
pub mod policy;
pub mod registry;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use config::{Config, Paths};
pub use ops::{InstallError, Installer};
pub use registry::HttpRegistry;
pub use store::{InstallRecord, StateStore};
pub use types::{PackageName, Version};

use dirs::home_dir;
use std::path::PathBuf;

/// Returns the primary configuration directory, or None if the user's home
/// cannot be resolved.
pub fn try_keg_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("KEG_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".keg"))
}

/// Returns the canonical keg home directory (`~/.keg`).
///
/// # Panics
/// Panics if the home directory cannot be determined.
pub fn keg_home() -> PathBuf {
    try_keg_home().expect("Could not determine home directory")
}

/// User Agent string
pub const USER_AGENT: &str = concat!("keg/", env!("CARGO_PKG_VERSION"));
