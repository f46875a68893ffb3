//! Domain-specific errors for package operations

use thiserror::Error;

use crate::registry::RegistryError;
use crate::store::StoreError;
use crate::types::PackageName;

/// Failure of an install or remove pipeline.
///
/// Each variant corresponds to one pipeline stage, so the variant alone
/// identifies how far an install got before failing.
#[derive(Error, Debug)]
pub enum InstallError {
    /// Resolution failed: the registry has no such package.
    #[error("Package '{name}' not found")]
    NotFound {
        /// Name that failed to resolve.
        name: PackageName,
    },

    /// Download or registry transport failed.
    #[error("Download failed: {0}")]
    Transfer(String),

    /// The artifact was rejected by the integrity gate.
    #[error("Artifact failed integrity validation")]
    IntegrityRejected,

    /// The artifact's signature tag did not verify.
    #[error("Artifact signature verification failed")]
    SignatureRejected,

    /// Creating or deleting an install directory failed.
    #[error("Install directory error: {0}")]
    Extraction(#[source] std::io::Error),

    /// Persisting the state document failed.
    #[error("Failed to persist state: {0}")]
    Persistence(#[from] StoreError),

    /// Remove was asked for a package that is not installed.
    #[error("Package '{0}' is not installed")]
    NotInstalled(PackageName),
}

impl From<RegistryError> for InstallError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { name, .. } => Self::NotFound { name },
            RegistryError::Http(err) => Self::Transfer(err.to_string()),
        }
    }
}
