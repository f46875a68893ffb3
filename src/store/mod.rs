//! Durable installed-package state.
//!
//! The state document is a map of package name to [`InstallRecord`], embedded
//! in the configuration document and rewritten atomically as a whole. The
//! [`StateStore`] owns load, persist, and the advisory lock taken around
//! mutations.

pub mod record;
pub mod state;

pub use record::{InstallRecord, StateDocument};
pub use state::{StateLock, StateStore, StoreError};
