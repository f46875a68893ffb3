//! Configuration document and on-disk layout.
//!
//! keg keeps everything under a single config root (`~/.keg`, overridable via
//! `KEG_HOME`): the JSON configuration document, the per-package install
//! directories, and the transient download cache. [`Config`] is constructed
//! once at startup and passed into the installer and the policy gates; there
//! is no ambient global configuration.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::store::StateDocument;
use crate::types::PackageName;

/// Default registry endpoint baked into fresh configurations.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.keg.sh";

/// Default shared key for the placeholder signature scheme.
///
/// This is a compiled-in constant, not a secret: the tag check it feeds is a
/// self-consistency gate, not a security boundary. Deployments that want a
/// different key set `shared_key` in `config.json`.
pub const DEFAULT_SHARED_KEY: &str = "3.141592653589793";

/// File name of the configuration document inside the config root.
pub const CONFIG_FILENAME: &str = "config.json";

/// File name of the advisory lock taken around state mutations.
pub const LOCK_FILENAME: &str = "config.lock";

/// Directory under the config root holding one subdirectory per package.
pub const PACKAGES_DIR: &str = "packages";

/// Directory under the config root holding cached downloaded artifacts.
pub const CACHE_DIR: &str = "cache";

/// Extension given to cached artifact files (`cache/<name>.keg`).
pub const ARTIFACT_EXTENSION: &str = "keg";

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

fn default_shared_key() -> String {
    DEFAULT_SHARED_KEY.to_string()
}

fn default_true() -> bool {
    true
}

/// The persisted configuration document (`config.json`).
///
/// This is the single unit of persistence: settings and the installed-package
/// state document live in one file, loaded on every process start and
/// rewritten as a whole after each mutation. Missing keys are backfilled with
/// defaults on load; unknown keys are preserved across load/persist cycles so
/// a newer keg does not destroy fields written by an older or newer one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the package registry.
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Whether the integrity gate runs against downloaded artifacts.
    #[serde(default = "default_true")]
    pub integrity_validation_enabled: bool,

    /// Whether artifact signature tags are verified.
    ///
    /// Turning this off is a trust-reduction mode, not a default.
    #[serde(default = "default_true")]
    pub verify_signatures: bool,

    /// Recognized for forward compatibility; no operation consults it yet.
    #[serde(default)]
    pub auto_update: bool,

    /// Shared key mixed into the expected signature tag.
    #[serde(default = "default_shared_key")]
    pub shared_key: String,

    /// The state document: one install record per installed package.
    #[serde(default)]
    pub installed_packages: StateDocument,

    /// Unrecognized keys, carried verbatim so they survive a rewrite.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: default_registry_url(),
            integrity_validation_enabled: true,
            verify_signatures: true,
            auto_update: false,
            shared_key: default_shared_key(),
            installed_packages: StateDocument::new(),
            extra: serde_json::Map::new(),
        }
    }
}

/// On-disk layout rooted at the config root directory.
///
/// ```text
/// ~/.keg/
/// ├── config.json   # configuration + state document
/// ├── config.lock   # advisory lock file
/// ├── packages/     # one subdirectory per installed package
/// └── cache/        # transient downloaded artifacts
/// ```
#[derive(Debug, Clone)]
pub struct Paths {
    root: PathBuf,
}

impl Paths {
    /// Lay out paths under the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Lay out paths under the default config root (`$KEG_HOME` or `~/.keg`),
    /// or `None` if the user's home directory cannot be resolved.
    pub fn resolve() -> Option<Self> {
        crate::try_keg_home().map(Self::new)
    }

    /// The config root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the configuration document.
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILENAME)
    }

    /// Path of the advisory lock file.
    pub fn lock_file(&self) -> PathBuf {
        self.root.join(LOCK_FILENAME)
    }

    /// Directory holding the per-package install directories.
    pub fn packages_dir(&self) -> PathBuf {
        self.root.join(PACKAGES_DIR)
    }

    /// Directory holding cached downloaded artifacts.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR)
    }

    /// Install directory for a package: `packages/<name>`.
    pub fn package_dir(&self, name: &PackageName) -> PathBuf {
        self.packages_dir().join(name)
    }

    /// Cached artifact file for a package: `cache/<name>.keg`.
    pub fn cached_artifact(&self, name: &PackageName) -> PathBuf {
        self.cache_dir()
            .join(format!("{name}.{ARTIFACT_EXTENSION}"))
    }

    /// Create the config root, packages, and cache directories if missing.
    pub fn bootstrap(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.packages_dir())?;
        std::fs::create_dir_all(self.cache_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_are_backfilled_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.registry_url, DEFAULT_REGISTRY_URL);
        assert!(config.integrity_validation_enabled);
        assert!(config.verify_signatures);
        assert!(!config.auto_update);
        assert_eq!(config.shared_key, DEFAULT_SHARED_KEY);
        assert!(config.installed_packages.is_empty());
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let raw = r#"{"registry_url":"https://example.test","pi_frequency":3.14}"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.registry_url, "https://example.test");

        let rewritten = serde_json::to_string(&config).unwrap();
        let reloaded: Config = serde_json::from_str(&rewritten).unwrap();
        assert_eq!(reloaded.extra.get("pi_frequency"), config.extra.get("pi_frequency"));
        assert!(reloaded.extra.contains_key("pi_frequency"));
    }

    #[test]
    fn paths_are_rooted_at_the_config_root() {
        let paths = Paths::new("/tmp/keg-root");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/keg-root/config.json"));
        assert_eq!(paths.lock_file(), PathBuf::from("/tmp/keg-root/config.lock"));
        let name = PackageName::new("jq");
        assert_eq!(
            paths.package_dir(&name),
            PathBuf::from("/tmp/keg-root/packages/jq")
        );
        assert_eq!(
            paths.cached_artifact(&name),
            PathBuf::from("/tmp/keg-root/cache/jq.keg")
        );
    }

    #[test]
    fn bootstrap_creates_the_layout() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::new(dir.path().join(".keg"));
        paths.bootstrap().unwrap();
        assert!(paths.packages_dir().is_dir());
        assert!(paths.cache_dir().is_dir());
    }
}
