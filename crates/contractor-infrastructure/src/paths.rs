//! Unified path management for contractor files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/contractor/        # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/contractor/   # Data directory, base for relative paths
//! ├── templates/               # {type}_template.txt, {type}_{role}_template.txt
//! ├── output/                  # Generated documents
//! └── db/contracts.toml        # Contract records
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "contractor";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Platform-specific locations for contractor.
pub struct ContractorPaths;

impl ContractorPaths {
    /// Returns the contractor configuration directory (e.g. `~/.config/contractor/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the contractor data directory (e.g. `~/.local/share/contractor/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolves `path` against `base` unless it is already absolute.
    pub fn resolve(base: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }
}
