//! Health command

use anyhow::{bail, Result};

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

/// Check configuration and installed packages
pub fn health() -> Result<()> {
    let installer = super::open()?;
    let config = installer.config();
    let paths = installer.paths();
    let lw = 12;

    let rows = [
        ("registry", config.registry_url.clone()),
        ("root", paths.root().display().to_string()),
        ("packages", paths.packages_dir().display().to_string()),
        ("cache", paths.cache_dir().display().to_string()),
        ("integrity", on_off(config.integrity_validation_enabled).to_string()),
        ("signatures", on_off(config.verify_signatures).to_string()),
    ];

    println!();
    println!("Configuration");
    for (label, value) in rows {
        println!("  {label:<lw$}{value}");
    }
    println!();

    let report = installer.health_check();
    if report.statuses.is_empty() {
        println!("No packages installed.");
        return Ok(());
    }

    for status in &report.statuses {
        println!("  {status}");
    }
    println!();

    if !report.healthy() {
        bail!(
            "{} of {} packages have problems",
            report.issues,
            report.statuses.len()
        );
    }

    println!("{} packages healthy", report.statuses.len());
    Ok(())
}
