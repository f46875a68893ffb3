//! Installation Flow Typestate Pattern
//!
//! Models the installation pipeline as a series of explicit state transitions:
//!
//! ```text
//! UnresolvedPackage --[resolve()]--> ResolvedPackage --[fetch()]--> FetchedArtifact
//!   --[check_integrity()]--> VettedArtifact --[verify_signature()]--> ClearedArtifact
//!   --[extract()]--> StagedInstall
//! ```
//!
//! Each transition consumes the previous state, so at compile time an
//! artifact cannot be extracted before it passed the integrity gate, and
//! cannot be committed before it was extracted.
//!
//! # Usage
//!
//! ```ignore
//! use crate::ops::flow::UnresolvedPackage;
//!
//! let unresolved = UnresolvedPackage::new(name, None);
//! let resolved = unresolved.resolve(&registry).await?;
//! let fetched = resolved.fetch(&registry, &paths).await?;
//! let vetted = fetched.check_integrity(&gate)?;
//! let cleared = vetted.verify_signature(&verifier)?;
//! let staged = cleared.extract(&paths)?;
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::ops::InstallError;
use crate::policy::{IntegrityGate, SignatureVerifier};
use crate::registry::{PackageMetadata, Registry};
use crate::store::InstallRecord;
use crate::types::{PackageName, Version};

/// File name of the opaque payload inside an install directory.
pub const PAYLOAD_FILENAME: &str = "payload.keg";

/// File name of the install manifest inside an install directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Format marker written into every install manifest.
pub const PACKAGE_FORMAT: &str = "keg-package";

/// Manifest written next to the payload in every install directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallManifest {
    /// Always [`PACKAGE_FORMAT`] for directories written by this pipeline.
    pub package_format: String,
    /// Whether the payload passed validation before extraction.
    pub validated: bool,
    /// RFC 3339 UTC timestamp of the extraction.
    pub extracted_at: String,
}

/// State 1: A package that has been requested but not yet resolved.
///
/// The package name is known, but the version, download URL, and signature
/// tag have not yet been determined.
///
/// # Transitions
///
/// - [`resolve()`](Self::resolve) -> [`ResolvedPackage`]
#[derive(Debug)]
pub struct UnresolvedPackage {
    /// The requested package name.
    pub name: PackageName,
    /// Optional requested version (None = registry default).
    pub requested: Option<Version>,
}

/// State 2: A package whose metadata has been resolved.
///
/// We now know which version to install, where to download the artifact
/// from, and the signature tag to verify it against.
///
/// # Transitions
///
/// - [`fetch()`](Self::fetch) -> [`FetchedArtifact`]
#[derive(Debug)]
pub struct ResolvedPackage {
    /// The resolved package name.
    pub name: PackageName,
    /// Metadata returned by the registry.
    pub metadata: PackageMetadata,
}

/// State 3: An artifact that has been downloaded and cached.
///
/// The raw bytes are in memory and a copy sits in the cache directory, but
/// nothing has been validated yet.
///
/// # Transitions
///
/// - [`check_integrity()`](Self::check_integrity) -> [`VettedArtifact`]
#[derive(Debug)]
pub struct FetchedArtifact {
    /// The package name.
    pub name: PackageName,
    /// Metadata returned by the registry.
    pub metadata: PackageMetadata,
    /// The downloaded artifact bytes.
    pub bytes: Vec<u8>,
}

/// State 4: An artifact that passed the integrity gate.
///
/// # Transitions
///
/// - [`verify_signature()`](Self::verify_signature) -> [`ClearedArtifact`]
#[derive(Debug)]
pub struct VettedArtifact {
    /// The package name.
    pub name: PackageName,
    /// Metadata returned by the registry.
    pub metadata: PackageMetadata,
    /// The validated artifact bytes.
    pub bytes: Vec<u8>,
}

/// State 5: An artifact whose signature tag verified.
///
/// Both gates have passed; the artifact is cleared for extraction.
///
/// # Transitions
///
/// - [`extract()`](Self::extract) -> [`StagedInstall`]
#[derive(Debug)]
pub struct ClearedArtifact {
    /// The package name.
    pub name: PackageName,
    /// Metadata returned by the registry.
    pub metadata: PackageMetadata,
    /// The cleared artifact bytes.
    pub bytes: Vec<u8>,
}

/// State 6: A package extracted into its install directory.
///
/// The payload and manifest are on disk; all that remains is committing the
/// install record to the state document.
#[derive(Debug)]
pub struct StagedInstall {
    /// The package name.
    pub name: PackageName,
    /// The installed version.
    pub version: Version,
    /// The install directory that was written.
    pub install_path: PathBuf,
}

impl UnresolvedPackage {
    /// Create a new unresolved package request.
    pub fn new(name: PackageName, requested: Option<Version>) -> Self {
        Self { name, requested }
    }

    /// Resolves the package against the registry.
    pub async fn resolve<R: Registry + ?Sized>(
        self,
        registry: &R,
    ) -> Result<ResolvedPackage, InstallError> {
        let metadata = registry.resolve(&self.name, self.requested.as_ref()).await?;
        tracing::info!(
            name = %self.name,
            version = %metadata.version,
            "resolved package"
        );
        Ok(ResolvedPackage {
            name: self.name,
            metadata,
        })
    }
}

impl ResolvedPackage {
    /// Downloads the artifact and writes a copy into the cache directory.
    pub async fn fetch<R: Registry + ?Sized>(
        self,
        registry: &R,
        paths: &Paths,
    ) -> Result<FetchedArtifact, InstallError> {
        let bytes = registry.fetch(&self.metadata.download_url).await?;
        tracing::info!(name = %self.name, size = bytes.len(), "fetched artifact");

        let cached = paths.cached_artifact(&self.name);
        if let Some(parent) = cached.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| InstallError::Transfer(format!("could not create cache: {err}")))?;
        }
        std::fs::write(&cached, &bytes)
            .map_err(|err| InstallError::Transfer(format!("could not cache artifact: {err}")))?;

        Ok(FetchedArtifact {
            name: self.name,
            metadata: self.metadata,
            bytes,
        })
    }
}

impl FetchedArtifact {
    /// Runs the integrity gate over the artifact bytes.
    pub fn check_integrity(
        self,
        gate: &dyn IntegrityGate,
    ) -> Result<VettedArtifact, InstallError> {
        if gate.accept(&self.bytes) {
            Ok(VettedArtifact {
                name: self.name,
                metadata: self.metadata,
                bytes: self.bytes,
            })
        } else {
            Err(InstallError::IntegrityRejected)
        }
    }
}

impl VettedArtifact {
    /// Verifies the artifact against the registry-advertised signature tag.
    pub fn verify_signature(
        self,
        verifier: &dyn SignatureVerifier,
    ) -> Result<ClearedArtifact, InstallError> {
        if verifier.verify(&self.bytes, &self.metadata.signature) {
            Ok(ClearedArtifact {
                name: self.name,
                metadata: self.metadata,
                bytes: self.bytes,
            })
        } else {
            Err(InstallError::SignatureRejected)
        }
    }
}

impl ClearedArtifact {
    /// Writes the payload and manifest into the package's install directory.
    ///
    /// An existing install directory is replaced whole, so re-installing a
    /// package overwrites the previous contents.
    pub fn extract(self, paths: &Paths) -> Result<StagedInstall, InstallError> {
        let install_path = paths.package_dir(&self.name);

        if install_path.exists() {
            std::fs::remove_dir_all(&install_path).map_err(InstallError::Extraction)?;
        }
        std::fs::create_dir_all(&install_path).map_err(InstallError::Extraction)?;

        std::fs::write(install_path.join(PAYLOAD_FILENAME), &self.bytes)
            .map_err(InstallError::Extraction)?;

        let manifest = InstallManifest {
            package_format: PACKAGE_FORMAT.to_string(),
            validated: true,
            extracted_at: chrono::Utc::now().to_rfc3339(),
        };
        let serialized = serde_json::to_string_pretty(&manifest)
            .map_err(|err| InstallError::Extraction(std::io::Error::other(err)))?;
        std::fs::write(install_path.join(MANIFEST_FILENAME), serialized)
            .map_err(InstallError::Extraction)?;

        tracing::info!(name = %self.name, path = %install_path.display(), "extracted package");

        Ok(StagedInstall {
            name: self.name,
            version: self.metadata.version,
            install_path,
        })
    }
}

impl StagedInstall {
    /// Produce the install record to commit for this staged install.
    pub fn into_record(self) -> (PackageName, InstallRecord) {
        let record = InstallRecord {
            version: self.version,
            install_path: self.install_path,
            installed_at: chrono::Utc::now().to_rfc3339(),
            validated: true,
        };
        (self.name, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleared(name: &str, bytes: &[u8]) -> ClearedArtifact {
        let name = PackageName::new(name);
        ClearedArtifact {
            name: name.clone(),
            metadata: PackageMetadata {
                name,
                version: Version::new("1.2.3"),
                download_url: "https://artifacts.test/demo.keg".to_string(),
                signature: String::new(),
                dependencies: Vec::new(),
            },
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn extract_writes_payload_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::new(dir.path());
        paths.bootstrap().unwrap();

        let staged = cleared("demo", b"artifact bytes").extract(&paths).unwrap();
        assert_eq!(staged.install_path, paths.package_dir(&staged.name));
        assert_eq!(staged.version.as_str(), "1.2.3");

        let payload = std::fs::read(staged.install_path.join(PAYLOAD_FILENAME)).unwrap();
        assert_eq!(payload, b"artifact bytes");

        let raw = std::fs::read_to_string(staged.install_path.join(MANIFEST_FILENAME)).unwrap();
        let manifest: InstallManifest = serde_json::from_str(&raw).unwrap();
        assert_eq!(manifest.package_format, PACKAGE_FORMAT);
        assert!(manifest.validated);
        assert!(!manifest.extracted_at.is_empty());
    }

    #[test]
    fn extract_replaces_a_previous_install_directory() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::new(dir.path());
        paths.bootstrap().unwrap();

        let install_path = paths.package_dir(&PackageName::new("demo"));
        std::fs::create_dir_all(&install_path).unwrap();
        std::fs::write(install_path.join("stale.txt"), b"old").unwrap();

        cleared("demo", b"new bytes").extract(&paths).unwrap();

        assert!(!install_path.join("stale.txt").exists());
        let payload = std::fs::read(install_path.join(PAYLOAD_FILENAME)).unwrap();
        assert_eq!(payload, b"new bytes");
    }

    #[test]
    fn staged_install_commits_a_validated_record() {
        let staged = StagedInstall {
            name: PackageName::new("demo"),
            version: Version::new("1.2.3"),
            install_path: PathBuf::from("/tmp/keg/packages/demo"),
        };
        let (name, record) = staged.into_record();
        assert_eq!(name.as_str(), "demo");
        assert_eq!(record.version.as_str(), "1.2.3");
        assert!(record.validated);
        assert!(!record.installed_at.is_empty());
    }
}
