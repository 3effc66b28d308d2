//! What board assembly needs to know about an Arduino install
//!
//! [`crate::infra::install::ArduinoContext`] answers these questions from the
//! filesystem; tests can answer them from memory.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::node::ConfigNode;
use crate::config::layout;
use crate::error::ArduinoError;

/// Per-family directories of an install
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FamilyDir {
    /// Core sources (`cores/<build.core>`)
    Cores,
    /// Pin variant headers
    Variants,
    /// Bundled libraries
    Libraries,
    /// Bootloader images
    Bootloaders,
    /// Firmware images for on-board helper chips
    Firmwares,
}

impl FamilyDir {
    /// All directory kinds
    pub const ALL: [FamilyDir; 5] = [
        Self::Cores,
        Self::Variants,
        Self::Libraries,
        Self::Bootloaders,
        Self::Firmwares,
    ];

    /// Directory name on disk
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Cores => layout::CORES_DIR,
            Self::Variants => layout::VARIANTS_DIR,
            Self::Libraries => layout::LIBRARIES_DIR,
            Self::Bootloaders => layout::BOOTLOADERS_DIR,
            Self::Firmwares => layout::FIRMWARES_DIR,
        }
    }
}

impl fmt::Display for FamilyDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Expand a leading `~` in `path` to `user_home`
///
/// Only `~` and `~/...` are expanded; `~user` forms are returned unchanged.
pub fn expand_user(path: &str, user_home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), user_home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    }
}

/// An installed Arduino IDE/toolchain tree
pub trait Installation {
    /// Install home directory
    fn home(&self) -> &Path;

    /// Whether this predates Arduino 1.5 (no `platform.txt`, no CPU menus)
    fn is_legacy(&self) -> bool;

    /// `runtime.ide.*` layer, when the install reports its version
    fn runtime_config(&self) -> Option<&ConfigNode>;

    /// Board definitions keyed by family, then by board name
    fn boards_by_family(&self) -> Result<BTreeMap<String, ConfigNode>, ArduinoError>;

    /// `platform.txt` contents for one family (`None` on legacy installs)
    fn platform(&self, family: &str) -> Result<Option<ConfigNode>, ArduinoError>;

    /// One of the per-family directories
    fn family_dir(&self, family: &str, kind: FamilyDir) -> Option<PathBuf>;

    /// Root of the tools tree, holding uploaders shared by all families
    fn tools_root(&self) -> PathBuf {
        self.home()
            .join(layout::HARDWARE_DIR)
            .join(layout::TOOLS_DIR)
    }

    /// Toolchain directory for one family
    fn tools_dir(&self, family: &str) -> Option<PathBuf>;

    /// Directory holding the family's compiler binaries
    fn compiler_dir(&self, family: &str) -> Option<PathBuf> {
        self.tools_dir(family).map(|dir| dir.join("bin"))
    }

    /// Home directory used to expand `~` in resolved paths
    fn user_home(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    /// Existence probe for directories
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// Existence probe for files
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
