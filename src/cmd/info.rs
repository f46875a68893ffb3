//! Info command

use anyhow::{bail, Result};

use crate::types::PackageName;

/// Show info about an installed package
pub fn info(package: &str) -> Result<()> {
    let installer = super::open()?;
    let name = PackageName::new(package);

    let Some(record) = installer.record(&name) else {
        bail!("Package '{name}' is not installed");
    };

    let lw = 12;
    println!();
    println!("  {name} {}", record.version);
    println!();
    println!("  {:<lw$}{}", "path", record.install_path.display());
    println!("  {:<lw$}{}", "installed", record.installed_at);
    println!(
        "  {:<lw$}{}",
        "validated",
        if record.validated { "yes" } else { "no" }
    );

    Ok(())
}
