//! Remove command

use anyhow::{Context, Result};

use crate::types::PackageName;

/// Remove an installed package
pub fn remove(package: &str) -> Result<()> {
    let mut installer = super::open()?;
    let name = PackageName::new(package);

    let record = installer
        .remove(&name)
        .with_context(|| format!("Failed to remove '{name}'"))?;

    println!("Removed {name} {}", record.version);
    Ok(())
}
