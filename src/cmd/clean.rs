//! Clean command

use anyhow::{Context, Result};

/// Remove cached artifact files
pub fn clean() -> Result<()> {
    let installer = super::open()?;
    let cache_dir = installer.paths().cache_dir();

    let mut removed = 0;
    if cache_dir.exists() {
        let entries = std::fs::read_dir(&cache_dir)
            .with_context(|| format!("Failed to read cache at {}", cache_dir.display()))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && std::fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }
    }

    if removed == 0 {
        println!("Cache is clean.");
    } else {
        println!("Removed {removed} cached artifacts.");
    }
    Ok(())
}
