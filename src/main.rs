//! keg - a small local package manager CLI

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use keg::cmd;

#[derive(Parser)]
#[command(name = "keg")]
#[command(author, version, about = "keg - a small local package manager")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install a package
    Install {
        /// Package name
        package: String,
        /// Specific version to install (default: registry's choice)
        #[arg(long)]
        version: Option<String>,
    },
    /// Remove an installed package
    Remove {
        /// Package name
        package: String,
    },
    /// List installed packages
    List,
    /// Check configuration and installed packages
    Health,
    /// Show info about an installed package
    Info {
        /// Package name
        package: String,
    },
    /// Remove cached artifact files
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        std::process::exit(1);
    };

    match command {
        Commands::Install { package, version } => {
            cmd::install::install(&package, version.as_deref()).await
        }
        Commands::Remove { package } => cmd::remove::remove(&package),
        Commands::List => cmd::list::list(),
        Commands::Health => cmd::health::health(),
        Commands::Info { package } => cmd::info::info(&package),
        Commands::Clean => cmd::clean::clean(),
    }
}
