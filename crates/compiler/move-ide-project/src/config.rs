use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{find_upward, ProjectError};

pub const CONFIG_FILE_NAME: &str = "move-ide.toml";

/// Tool configuration read from `move-ide.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MoveIdeToml {
    pub analyzer: AnalyzerSection,
    pub compiler: CompilerSection,
}

/// `[analyzer]`: which semantic checks report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerSection {
    pub width_mismatch_warnings: bool,
    pub unresolved_function_errors: bool,
    /// Names treated as callable in addition to the file's own declarations
    pub known_functions: Vec<String>,
}

impl Default for AnalyzerSection {
    fn default() -> Self {
        Self {
            width_mismatch_warnings: true,
            unresolved_function_errors: true,
            known_functions: Vec::new(),
        }
    }
}

/// `[compiler]`: the external build command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerSection {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for CompilerSection {
    fn default() -> Self {
        Self {
            command: "sui".to_string(),
            args: vec!["move".to_string(), "build".to_string()],
        }
    }
}

impl MoveIdeToml {
    pub fn from_path(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ProjectError::Toml {
            path: path.to_owned(),
            source,
        })
    }

    /// Loads the nearest `move-ide.toml` at or above `start`.
    ///
    /// Returns `Ok(None)` when there is none; a file that exists but does
    /// not parse is an error.
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>, ProjectError> {
        let Some(path) = find_upward(start, CONFIG_FILE_NAME) else {
            tracing::trace!("No {} above {}", CONFIG_FILE_NAME, start.display());
            return Ok(None);
        };
        tracing::debug!("Using configuration {}", path.display());
        let config = Self::from_path(&path)?;
        Ok(Some((path, config)))
    }
}
