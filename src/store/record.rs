//! Install records.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{PackageName, Version};

/// The installed-package state document: one record per package, keyed by
/// name. A `BTreeMap` keeps the serialized document and all listings in
/// stable name order.
pub type StateDocument = BTreeMap<PackageName, InstallRecord>;

/// Durable record of one installed package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRecord {
    /// Version that was installed.
    pub version: Version,

    /// Absolute path of the package's install directory.
    pub install_path: PathBuf,

    /// RFC 3339 UTC timestamp of when the install completed.
    pub installed_at: String,

    /// Whether the artifact passed validation at install time. Always `true`
    /// for records written by the current pipeline; retained because older
    /// documents may carry `false`.
    pub validated: bool,
}
