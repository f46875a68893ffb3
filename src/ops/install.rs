//! The installer: wiring and the install operation.

use std::fmt;

use crate::config::{Config, Paths};
use crate::ops::flow::UnresolvedPackage;
use crate::ops::InstallError;
use crate::policy::{EntropyGate, IntegrityGate, KeyedTagVerifier, SignatureVerifier};
use crate::registry::Registry;
use crate::store::{InstallRecord, StateStore};
use crate::types::{PackageName, Version};

/// Package operations over a registry, the policy gates, and the state store.
///
/// One installer is built per process from the loaded configuration. Mutating
/// operations take the advisory lock, reload the state document under it,
/// apply their change, and persist the whole document before releasing.
pub struct Installer<R> {
    pub(crate) config: Config,
    pub(crate) paths: Paths,
    pub(crate) registry: R,
    pub(crate) store: StateStore,
    pub(crate) gate: Box<dyn IntegrityGate + Send + Sync>,
    pub(crate) verifier: Box<dyn SignatureVerifier + Send + Sync>,
}

impl<R> Installer<R> {
    /// Build an installer with policy gates configured from `config`.
    pub fn new(config: Config, paths: Paths, registry: R) -> Self {
        let gate = Box::new(EntropyGate::from_config(&config));
        let verifier = Box::new(KeyedTagVerifier::from_config(&config));
        let store = StateStore::new(paths.clone());
        Self {
            config,
            paths,
            registry,
            store,
            gate,
            verifier,
        }
    }

    /// Replace the policy gates. Used by tests to inject custom policies.
    pub fn with_gates(
        mut self,
        gate: Box<dyn IntegrityGate + Send + Sync>,
        verifier: Box<dyn SignatureVerifier + Send + Sync>,
    ) -> Self {
        self.gate = gate;
        self.verifier = verifier;
        self
    }

    /// The configuration this installer was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The on-disk layout this installer operates on.
    pub fn paths(&self) -> &Paths {
        &self.paths
    }
}

impl<R: fmt::Debug> fmt::Debug for Installer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Installer")
            .field("paths", &self.paths)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<R: Registry + Sync> Installer<R> {
    /// Install a package, running the full pipeline.
    ///
    /// Resolution, fetch, both policy gates, extraction, and the state commit
    /// run in order; the first failure aborts the pipeline and no record is
    /// written. Re-installing a package overwrites its install directory and
    /// record.
    pub async fn install(
        &mut self,
        name: PackageName,
        requested: Option<Version>,
    ) -> Result<InstallRecord, InstallError> {
        let _lock = self.store.lock_exclusive()?;
        // Reload under the lock so a concurrent process's commits are kept.
        self.config.installed_packages = self.store.load().installed_packages;

        let staged = UnresolvedPackage::new(name, requested)
            .resolve(&self.registry)
            .await?
            .fetch(&self.registry, &self.paths)
            .await?
            .check_integrity(self.gate.as_ref())?
            .verify_signature(self.verifier.as_ref())?
            .extract(&self.paths)?;

        let (name, record) = staged.into_record();
        self.config
            .installed_packages
            .insert(name.clone(), record.clone());
        self.store.persist(&self.config)?;

        tracing::info!(name = %name, version = %record.version, "installed package");
        Ok(record)
    }
}
