//! Package operations.
//!
//! [`Installer`] wires the registry, policy gates, and state store together
//! and exposes the package operations: install, remove, list, and health.
//! The install pipeline itself lives in [`flow`] as a typestate chain.

pub mod error;
pub mod flow;
pub mod health;
pub mod install;
pub mod remove;

pub use error::InstallError;
pub use health::{HealthReport, PackageHealth};
pub use install::Installer;
