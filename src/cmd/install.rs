//! Install command

use anyhow::{Context, Result};

use crate::types::{PackageName, Version};

/// Install a package
pub async fn install(package: &str, version: Option<&str>) -> Result<()> {
    let mut installer = super::open()?;
    let name = PackageName::new(package);
    let requested = version.map(Version::new);

    println!("Installing '{name}'...");

    let record = installer
        .install(name.clone(), requested)
        .await
        .with_context(|| format!("Failed to install '{name}'"))?;

    println!("Installed {name} {}", record.version);
    println!("  {}", record.install_path.display());
    Ok(())
}
