//! Command modules - one file per CLI command

pub mod clean;
pub mod health;
pub mod info;
pub mod install;
pub mod list;
pub mod remove;

use anyhow::{Context, Result};

use crate::config::Paths;
use crate::ops::Installer;
use crate::registry::HttpRegistry;
use crate::store::StateStore;

/// Build the installer every command runs against: resolve the config root,
/// create missing directories, load the config document, and wire the
/// registry client from it.
pub(crate) fn open() -> Result<Installer<HttpRegistry>> {
    let paths = Paths::resolve().context("Could not determine home directory")?;
    paths
        .bootstrap()
        .with_context(|| format!("Failed to create config root at {}", paths.root().display()))?;

    let config = StateStore::new(paths.clone()).load();
    let registry = HttpRegistry::new(&config.registry_url);
    Ok(Installer::new(config, paths, registry))
}
