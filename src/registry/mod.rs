//! Registry resolution and artifact transfer.
//!
//! The registry seam is a trait so the install pipeline can run against a
//! stub in tests. The production implementation is [`HttpRegistry`], which
//! speaks the JSON metadata protocol over HTTP.

pub mod http;

pub use http::HttpRegistry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{PackageName, Version};

fn default_version() -> Version {
    Version::new("1.0.0")
}

/// Package metadata returned by a registry resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Canonical package name.
    pub name: PackageName,

    /// Version the registry resolved to; defaults to `1.0.0` when the
    /// registry omits it.
    #[serde(default = "default_version")]
    pub version: Version,

    /// URL the artifact is fetched from.
    pub download_url: String,

    /// Signature tag advertised for the artifact, empty when unsigned.
    #[serde(default)]
    pub signature: String,

    /// Declared dependencies. Carried through verbatim; keg does not resolve
    /// them.
    #[serde(default)]
    pub dependencies: Vec<PackageName>,
}

/// Errors surfaced by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry has no such package (or no such version of it).
    #[error("Package '{name}' not found")]
    NotFound {
        /// Name that failed to resolve.
        name: PackageName,
        /// Version that was requested, if any.
        version: Option<Version>,
    },

    /// Transport or protocol failure talking to the registry.
    #[error("Registry request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A source of package metadata and artifact bytes.
#[async_trait]
pub trait Registry {
    /// Resolve a package name (and optional version) to its metadata.
    async fn resolve(
        &self,
        name: &PackageName,
        version: Option<&Version>,
    ) -> Result<PackageMetadata, RegistryError>;

    /// Fetch the raw artifact bytes from a download URL.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, RegistryError>;
}
