//! Type-safe identifiers used throughout the crate.

pub mod package;

pub use package::{PackageName, Version};
