use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// What kind of package IDs a repository holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryFormat {
    /// Installable packages built from source
    Source,
    /// Packages already merged to the live filesystem
    Installed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    pub format: RepositoryFormat,
    #[serde(default)]
    pub location: Option<PathBuf>,
}

/// Repositories keyed by name
pub type Repositories = BTreeMap<String, RepositoryConfig>;
