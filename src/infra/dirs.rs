//! Platform-specific directory discovery
//!
//! Locates the Arduino install and the user's sketchbook.
//!
//! Environment variables override the defaults:
//! - `ARDUINO_HOME` - Arduino install directory
//! - `SKETCHBOOK_HOME` - Sketchbook directory

use std::env;
use std::path::{Path, PathBuf};

use crate::config::defaults::{ENV_ARDUINO_HOME, ENV_SKETCHBOOK_HOME, LINUX_ARDUINO_HOME};
use crate::error::InstallError;

/// Sketchbook folder name under the documents directory
const SKETCHBOOK_SUBDIR: &str = "Arduino";

/// Arduino install directory
///
/// An explicit path wins, then `ARDUINO_HOME`, then the Linux package location.
#[must_use]
pub fn arduino_home(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    env_path(ENV_ARDUINO_HOME).unwrap_or_else(|| PathBuf::from(LINUX_ARDUINO_HOME))
}

/// User documents directory
pub fn documents_dir() -> Result<PathBuf, InstallError> {
    dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .ok_or(InstallError::NoDocumentsDir)
}

/// Sketchbook directory: `SKETCHBOOK_HOME`, else `<Documents>/Arduino`
pub fn sketchbook_dir() -> Result<PathBuf, InstallError> {
    if let Some(path) = env_path(ENV_SKETCHBOOK_HOME) {
        return Ok(path);
    }
    Ok(documents_dir()?.join(SKETCHBOOK_SUBDIR))
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
