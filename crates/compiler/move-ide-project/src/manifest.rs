use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ProjectError;

/// The parts of a `Move.toml` the tools care about. Dependency tables and
/// other sections are accepted and ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveManifest {
    pub package: PackageSection,
    /// Named addresses, e.g. `bank = "0x0"`
    #[serde(default)]
    pub addresses: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageSection {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub edition: Option<String>,
}

fn default_version() -> String {
    "0.0.0".to_string()
}

impl MoveManifest {
    /// Load manifest from a file path
    pub fn from_path(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_file_content(&content, path)
    }

    /// Parse manifest text; `path` is only used for error reporting
    pub fn from_file_content(content: &str, path: &Path) -> Result<Self, ProjectError> {
        toml::from_str(content).map_err(|source| {
            tracing::error!("Failed to parse {}: {}", path.display(), source);
            ProjectError::Toml {
                path: PathBuf::from(path),
                source,
            }
        })
    }

    /// Value of a named address, if the package declares it
    pub fn address(&self, name: &str) -> Option<&str> {
        self.addresses.get(name).map(String::as_str)
    }
}
