//! Move package layout and tool configuration.
//!
//! - [`MoveManifest`] is the `Move.toml` of a package
//! - [`MoveIdeToml`] is the optional `move-ide.toml` tool configuration
//! - [`discover_package`] finds the package enclosing a path and lists its
//!   sources

mod config;
mod discovery;
mod error;
mod manifest;

pub use config::{AnalyzerSection, CompilerSection, MoveIdeToml, CONFIG_FILE_NAME};
pub use discovery::{
    discover_package, find_package_root, find_upward, MovePackage, MANIFEST_FILE_NAME,
    SOURCE_DIRECTORIES,
};
pub use error::ProjectError;
pub use manifest::{MoveManifest, PackageSection};
