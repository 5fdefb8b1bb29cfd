use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::{MoveManifest, ProjectError};

pub const MANIFEST_FILE_NAME: &str = "Move.toml";

/// Package directories that hold Move sources, in listing order
pub const SOURCE_DIRECTORIES: [&str; 3] = ["sources", "tests", "scripts"];

/// A Move package found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePackage {
    /// Path to `Move.toml`
    pub manifest_path: PathBuf,
    /// Directory containing `Move.toml`
    pub root_directory: PathBuf,
    pub manifest: MoveManifest,
}

impl MovePackage {
    pub fn load(manifest_path: &Path) -> Result<Self, ProjectError> {
        let manifest = MoveManifest::from_path(manifest_path)?;
        let root_directory = manifest_path
            .parent()
            .map(Path::to_owned)
            .unwrap_or_default();
        Ok(Self {
            manifest_path: manifest_path.to_owned(),
            root_directory,
            manifest,
        })
    }

    pub fn name(&self) -> &str {
        &self.manifest.package.name
    }

    /// Check if a path belongs to this package
    pub fn contains_path(&self, path: &Path) -> bool {
        path.starts_with(&self.root_directory)
    }

    /// All `.move` files under the package's source directories, sorted by
    /// path within each directory. Missing directories are skipped.
    pub fn source_files(&self) -> Result<Vec<PathBuf>, ProjectError> {
        let mut files = Vec::new();
        for directory in SOURCE_DIRECTORIES {
            let directory = self.root_directory.join(directory);
            if !directory.is_dir() {
                continue;
            }
            let walker = WalkDir::new(&directory)
                .follow_links(false)
                .sort_by_file_name();
            for entry in walker {
                let entry = entry.map_err(|source| ProjectError::Walk {
                    path: directory.clone(),
                    source,
                })?;
                let path = entry.path();
                if entry.file_type().is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some("move")
                {
                    files.push(path.to_owned());
                }
            }
        }
        debug!("Found {} source file(s) in {}", files.len(), self.name());
        Ok(files)
    }
}

/// The nearest `name` in the directory of `start` or one of its ancestors.
/// A file `start` is searched from its parent directory.
pub fn find_upward(start: &Path, name: &str) -> Option<PathBuf> {
    let mut current = if start.is_file() {
        start.parent()?
    } else {
        start
    };

    loop {
        let candidate = current.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Directory of the nearest `Move.toml` at or above `start`
pub fn find_package_root(start: &Path) -> Option<PathBuf> {
    find_upward(start, MANIFEST_FILE_NAME).and_then(|manifest| manifest.parent().map(Path::to_owned))
}

/// Discovers the Move package enclosing `start_path`.
///
/// ## Returns
/// * `Ok(Some(MovePackage))` if a manifest is found
/// * `Ok(None)` if no manifest is found
/// * `Err` if the manifest cannot be read or parsed
pub fn discover_package(start_path: &Path) -> Result<Option<MovePackage>, ProjectError> {
    match find_upward(start_path, MANIFEST_FILE_NAME) {
        Some(manifest_path) => {
            debug!("Found package manifest at: {}", manifest_path.display());
            MovePackage::load(&manifest_path).map(Some)
        }
        None => {
            trace!(
                "No package manifest found starting from: {}",
                start_path.display()
            );
            Ok(None)
        }
    }
}
