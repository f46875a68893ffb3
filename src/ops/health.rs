//! Read-only operations: list, info, and the health check.

use std::fmt;
use std::path::PathBuf;

use crate::ops::Installer;
use crate::store::{InstallRecord, StateDocument};
use crate::types::{PackageName, Version};

/// Health status of one installed package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageHealth {
    /// The package name.
    pub name: PackageName,
    /// The recorded version.
    pub version: Version,
    /// The recorded install directory.
    pub install_path: PathBuf,
    /// Whether the install directory exists on disk.
    pub present: bool,
}

impl PackageHealth {
    /// One-word status for this package.
    pub fn status(&self) -> &'static str {
        if self.present {
            "ok"
        } else {
            "missing files"
        }
    }
}

impl fmt::Display for PackageHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.name, self.version, self.status())
    }
}

/// Result of a health check over the whole state document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// One status per installed package, in name order.
    pub statuses: Vec<PackageHealth>,
    /// Number of packages with problems.
    pub issues: usize,
}

impl HealthReport {
    /// `true` when no package has a problem.
    pub fn healthy(&self) -> bool {
        self.issues == 0
    }
}

impl<R> Installer<R> {
    /// The installed-package state document.
    pub fn list(&self) -> &StateDocument {
        &self.config.installed_packages
    }

    /// The install record for one package, if installed.
    pub fn record(&self, name: &PackageName) -> Option<&InstallRecord> {
        self.config.installed_packages.get(name)
    }

    /// Check every install record against the filesystem.
    ///
    /// Reports records whose install directory is gone. Never repairs,
    /// mutates, or locks; it observes and nothing more.
    pub fn health_check(&self) -> HealthReport {
        let statuses: Vec<PackageHealth> = self
            .config
            .installed_packages
            .iter()
            .map(|(name, record)| PackageHealth {
                name: name.clone(),
                version: record.version.clone(),
                install_path: record.install_path.clone(),
                present: record.install_path.is_dir(),
            })
            .collect();
        let issues = statuses.iter().filter(|status| !status.present).count();
        HealthReport { statuses, issues }
    }
}
