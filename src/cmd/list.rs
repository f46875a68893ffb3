//! List command

use anyhow::Result;

/// List all installed packages
pub fn list() -> Result<()> {
    let installer = super::open()?;
    let packages = installer.list();

    if packages.is_empty() {
        println!("No packages installed.");
        println!("Run 'keg install <package>' to get started.");
        return Ok(());
    }

    println!("Installed packages:");
    for (name, record) in packages {
        let ago = format_relative_time(&record.installed_at);
        let flag = if record.validated { "" } else { " [unvalidated]" };
        println!("  {name} {} (installed {ago}){flag}", record.version);
    }

    Ok(())
}

/// Format an RFC 3339 timestamp as relative time
fn format_relative_time(timestamp: &str) -> String {
    let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(timestamp) else {
        // Records written by hand or by older versions may not parse.
        return timestamp.to_string();
    };

    let diff = chrono::Utc::now().signed_duration_since(parsed).num_seconds();

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        format!("{} minutes ago", diff / 60)
    } else if diff < 86_400 {
        format!("{} hours ago", diff / 3600)
    } else {
        format!("{} days ago", diff / 86_400)
    }
}
