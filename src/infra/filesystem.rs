//! Filesystem operations
//!
//! Handles file and directory reads.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::node::ConfigNode;
use crate::core::parser::parse_config_str;
use crate::error::FilesystemError;

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read and parse a `boards.txt` / `platform.txt` style file
pub fn read_config_file(path: &Path) -> Result<ConfigNode, FilesystemError> {
    let content = read_file(path)?;
    tracing::debug!("Parsing {}", path.display());
    Ok(parse_config_str(&content))
}

/// Immediate subdirectories of `path`, sorted by name
pub fn list_dirs(path: &Path) -> Result<Vec<PathBuf>, FilesystemError> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| FilesystemError::ReadDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = read_file(&temp.path().join("boards.txt"));
        assert!(matches!(result, Err(FilesystemError::ReadFile { .. })));
    }

    #[test]
    fn test_read_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("boards.txt");
        std::fs::write(&path, "# comment\nuno.name=Arduino Uno\nuno.build.mcu=atmega328p\n").unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.get_str("uno.build.mcu"), Some("atmega328p"));
    }

    #[test]
    fn test_list_dirs_skips_files() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sam")).unwrap();
        std::fs::create_dir(temp.path().join("avr")).unwrap();
        std::fs::write(temp.path().join("readme.txt"), "").unwrap();

        let dirs = list_dirs(temp.path()).unwrap();
        assert_eq!(dirs, vec![temp.path().join("avr"), temp.path().join("sam")]);
    }

    #[test]
    fn test_list_dirs_missing() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            list_dirs(&temp.path().join("nope")),
            Err(FilesystemError::ReadDir { .. })
        ));
    }
}
