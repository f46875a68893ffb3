//! The remove operation.

use crate::ops::{InstallError, Installer};
use crate::store::InstallRecord;
use crate::types::PackageName;

impl<R> Installer<R> {
    /// Remove an installed package.
    ///
    /// Deletes the install directory (a directory already gone is tolerated),
    /// drops the record from the state document, and persists. Removing a
    /// package that is not installed fails with
    /// [`NotInstalled`](InstallError::NotInstalled), so a second remove of
    /// the same name is an ordinary failure rather than a panic.
    pub fn remove(&mut self, name: &PackageName) -> Result<InstallRecord, InstallError> {
        let _lock = self.store.lock_exclusive()?;
        self.config.installed_packages = self.store.load().installed_packages;

        let record = self
            .config
            .installed_packages
            .get(name)
            .cloned()
            .ok_or_else(|| InstallError::NotInstalled(name.clone()))?;

        if record.install_path.exists() {
            std::fs::remove_dir_all(&record.install_path).map_err(InstallError::Extraction)?;
        }

        self.config.installed_packages.remove(name);
        self.store.persist(&self.config)?;

        tracing::info!(name = %name, version = %record.version, "removed package");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Paths};
    use crate::store::StateStore;
    use crate::types::Version;
    use std::path::PathBuf;

    fn installer_with_record(
        dir: &std::path::Path,
        name: &PackageName,
        install_path: PathBuf,
    ) -> Installer<()> {
        let paths = Paths::new(dir);
        paths.bootstrap().unwrap();

        let mut config = Config::default();
        config.installed_packages.insert(
            name.clone(),
            InstallRecord {
                version: Version::new("1.0.0"),
                install_path,
                installed_at: "2026-08-21T00:00:00+00:00".to_string(),
                validated: true,
            },
        );
        StateStore::new(paths.clone()).persist(&config).unwrap();
        Installer::new(config, paths, ())
    }

    #[test]
    fn remove_deletes_directory_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let name = PackageName::new("demo");
        let install_path = dir.path().join("packages").join("demo");
        std::fs::create_dir_all(&install_path).unwrap();
        std::fs::write(install_path.join("payload.keg"), b"bytes").unwrap();

        let mut installer = installer_with_record(dir.path(), &name, install_path.clone());
        let record = installer.remove(&name).unwrap();

        assert_eq!(record.version.as_str(), "1.0.0");
        assert!(!install_path.exists());
        assert!(installer.store.load().installed_packages.is_empty());
    }

    #[test]
    fn remove_tolerates_a_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let name = PackageName::new("demo");
        let gone = dir.path().join("packages").join("demo");

        let mut installer = installer_with_record(dir.path(), &name, gone);
        installer.remove(&name).unwrap();
        assert!(installer.store.load().installed_packages.is_empty());
    }

    #[test]
    fn second_remove_reports_not_installed() {
        let dir = tempfile::tempdir().unwrap();
        let name = PackageName::new("demo");
        let install_path = dir.path().join("packages").join("demo");
        std::fs::create_dir_all(&install_path).unwrap();

        let mut installer = installer_with_record(dir.path(), &name, install_path);
        installer.remove(&name).unwrap();

        let err = installer.remove(&name).unwrap_err();
        assert!(matches!(err, InstallError::NotInstalled(_)));
    }
}
