//! Load, persist, and lock the configuration document.

use std::fs::{File, OpenOptions};
use std::io;

use fs4::FileExt;
use thiserror::Error;

use crate::config::{Config, Paths};

/// Errors from persisting or locking the configuration document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to write the document to disk.
    #[error("Failed to write state: {0}")]
    Write(#[source] io::Error),

    /// Failed to serialize the document.
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to take the advisory lock.
    #[error("Failed to lock state: {0}")]
    Lock(#[source] io::Error),
}

/// Held advisory lock over the configuration document.
///
/// The lock is released when the guard is dropped and the underlying file
/// handle closes. Crashed holders release it the same way.
#[derive(Debug)]
pub struct StateLock {
    _file: File,
}

/// Loads and persists the configuration document.
#[derive(Debug, Clone)]
pub struct StateStore {
    paths: Paths,
}

impl StateStore {
    /// Store over the document at `paths.config_file()`.
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    /// Load the configuration document, falling back to defaults.
    ///
    /// A missing file is the normal first run and loads silently; an
    /// unreadable or unparseable file is logged and replaced with defaults
    /// rather than aborting, since the next persist rewrites it whole.
    pub fn load(&self) -> Config {
        let path = self.paths.config_file();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Config::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not read config, using defaults");
                return Config::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not parse config, using defaults");
                Config::default()
            }
        }
    }

    /// Persist the configuration document atomically.
    ///
    /// The document is written to a temporary sibling, synced, and renamed
    /// over the target so readers never observe a partial write.
    pub fn persist(&self, config: &Config) -> Result<(), StoreError> {
        let path = self.paths.config_file();
        let serialized = serde_json::to_string_pretty(config)?;

        let tmp = path.with_extension("json.tmp");
        let mut file = File::create(&tmp).map_err(StoreError::Write)?;
        io::Write::write_all(&mut file, serialized.as_bytes()).map_err(StoreError::Write)?;
        file.sync_all().map_err(StoreError::Write)?;
        std::fs::rename(&tmp, &path).map_err(StoreError::Write)?;

        tracing::debug!(path = %path.display(), "persisted state");
        Ok(())
    }

    /// Take the exclusive advisory lock, blocking until it is available.
    pub fn lock_exclusive(&self) -> Result<StateLock, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(self.paths.lock_file())
            .map_err(StoreError::Lock)?;
        file.lock_exclusive().map_err(StoreError::Lock)?;
        Ok(StateLock { _file: file })
    }
}
