//! Arduino install discovery
//!
//! Reads the directory layout, `revisions.txt`, `boards.txt` and
//! `platform.txt` of an Arduino install.
//!
//! Two layouts exist:
//! - pre-1.5: a single `hardware/arduino/{boards.txt,cores,...}` tree, always AVR
//! - 1.5+: one `hardware/arduino/<family>/` tree per processor family, plus
//!   `revisions.txt` in the install home

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use semver::Version;

use super::dirs;
use super::filesystem::{list_dirs, read_config_file, read_file};
use crate::config::defaults::LEGACY_FAMILY;
use crate::config::layout;
use crate::core::board::board_names;
use crate::core::install::{FamilyDir, Installation};
use crate::core::node::ConfigNode;
use crate::error::{ArduinoError, InstallError};

/// First Arduino version with per-family hardware trees and CPU menus
const FIRST_MODERN_VERSION: Version = Version::new(1, 5, 0);

fn revisions_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^ARDUINO\s+(\d+)\.(\d+)\.(\d+)").expect("revisions pattern is valid")
    })
}

/// Parse the IDE version out of `revisions.txt` content
pub fn parse_revisions(content: &str) -> Option<Version> {
    let captures = revisions_regex().captures(content)?;
    let part = |i: usize| captures.get(i)?.as_str().parse::<u64>().ok();
    Some(Version::new(part(1)?, part(2)?, part(3)?))
}

/// An Arduino install on disk
#[derive(Debug, Clone)]
pub struct ArduinoContext {
    home: PathBuf,
    version: Option<Version>,
    legacy: bool,
    runtime: Option<ConfigNode>,
    families: BTreeMap<String, PathBuf>,
    single_tree: bool,
}

impl ArduinoContext {
    /// Inspect the install at `home`
    pub fn new(home: impl Into<PathBuf>) -> Result<Self, ArduinoError> {
        let home = home.into();
        let revisions_path = home.join(layout::REVISIONS_FILE);

        let version = if revisions_path.is_file() {
            let content = read_file(&revisions_path)?;
            let version = parse_revisions(&content).ok_or_else(|| InstallError::BadRevisions {
                path: revisions_path.clone(),
            })?;
            Some(version)
        } else {
            None
        };
        let legacy = version.as_ref().map_or(true, |v| *v < FIRST_MODERN_VERSION);

        let runtime = version.as_ref().map(|v| {
            let home = home.to_string_lossy();
            let ide_version = format!("{}_{}_{}", v.major, v.minor, v.patch);
            ConfigNode::from_pairs([
                ("runtime.ide.path", home.as_ref()),
                ("runtime.ide.version", ide_version.as_str()),
            ])
        });

        let arduino_root = home.join(layout::HARDWARE_DIR).join(layout::ARDUINO_DIR);
        let single_tree = arduino_root.join(layout::CORES_DIR).is_dir();
        let families = if single_tree {
            BTreeMap::from([(LEGACY_FAMILY.to_string(), arduino_root)])
        } else {
            list_dirs(&arduino_root)?
                .into_iter()
                .filter_map(|dir| {
                    let family = dir.file_name()?.to_string_lossy().into_owned();
                    Some((family, dir))
                })
                .collect()
        };

        tracing::info!(
            "Arduino install at {} (version: {}, pre-1.5: {legacy}, families: {})",
            home.display(),
            version
                .as_ref()
                .map_or_else(|| "unknown".to_string(), ToString::to_string),
            families.keys().cloned().collect::<Vec<_>>().join(", ")
        );

        Ok(Self {
            home,
            version,
            legacy,
            runtime,
            families,
            single_tree,
        })
    }

    /// Inspect the install named by `ARDUINO_HOME`, else the Linux package location
    pub fn auto() -> Result<Self, ArduinoError> {
        Self::new(dirs::arduino_home(None))
    }

    /// IDE version from `revisions.txt`
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    /// Root `hardware/arduino` directory
    pub fn arduino_dir_root(&self) -> PathBuf {
        self.home.join(layout::HARDWARE_DIR).join(layout::ARDUINO_DIR)
    }

    /// Processor families, in name order
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    /// `hardware/arduino` directory of each family
    pub fn arduino_dir_by_family(&self) -> &BTreeMap<String, PathBuf> {
        &self.families
    }

    /// One kind of per-family directory, for every family
    pub fn dir_by_family(&self, kind: FamilyDir) -> BTreeMap<String, PathBuf> {
        self.families
            .keys()
            .filter_map(|family| Some((family.clone(), self.family_dir(family, kind)?)))
            .collect()
    }

    /// Toolchain directory of each family
    pub fn tools_dir_by_family(&self) -> BTreeMap<String, PathBuf> {
        ["avr", "sam"]
            .into_iter()
            .filter_map(|family| Some((family.to_string(), self.tools_dir(family)?)))
            .collect()
    }

    /// Compiler binary directory of each family
    pub fn compiler_dir_by_family(&self) -> BTreeMap<String, PathBuf> {
        self.tools_dir_by_family()
            .into_iter()
            .map(|(family, dir)| (family, dir.join("bin")))
            .collect()
    }

    /// Board names of each family
    pub fn board_names_by_family(&self) -> Result<BTreeMap<String, Vec<String>>, ArduinoError> {
        Ok(self
            .boards_by_family()?
            .into_iter()
            .map(|(family, boards)| {
                let names = board_names(&boards).into_iter().map(String::from).collect();
                (family, names)
            })
            .collect())
    }

    /// `platform.txt` of every family
    pub fn platform_config_by_family(&self) -> Result<BTreeMap<String, ConfigNode>, ArduinoError> {
        if self.single_tree {
            return Err(InstallError::NoPlatformOnLegacy {
                path: self.home.clone(),
            }
            .into());
        }
        let mut platforms = BTreeMap::new();
        for (family, dir) in &self.families {
            let path = dir.join(layout::PLATFORM_FILE);
            if path.is_file() {
                platforms.insert(family.clone(), read_config_file(&path)?);
            }
        }
        Ok(platforms)
    }

    /// The user's sketchbook directory
    pub fn sketchbook_dir(&self) -> Result<PathBuf, InstallError> {
        dirs::sketchbook_dir()
    }
}

impl Installation for ArduinoContext {
    fn home(&self) -> &Path {
        &self.home
    }

    fn is_legacy(&self) -> bool {
        self.legacy
    }

    fn runtime_config(&self) -> Option<&ConfigNode> {
        self.runtime.as_ref()
    }

    fn boards_by_family(&self) -> Result<BTreeMap<String, ConfigNode>, ArduinoError> {
        let mut boards = BTreeMap::new();
        for (family, dir) in &self.families {
            let path = dir.join(layout::BOARDS_FILE);
            if !path.is_file() {
                tracing::debug!("No {} for family '{family}'", layout::BOARDS_FILE);
                continue;
            }
            boards.insert(family.clone(), read_config_file(&path)?);
        }
        Ok(boards)
    }

    fn platform(&self, family: &str) -> Result<Option<ConfigNode>, ArduinoError> {
        if self.legacy || self.single_tree {
            return Ok(None);
        }
        let Some(dir) = self.families.get(family) else {
            return Ok(None);
        };
        let path = dir.join(layout::PLATFORM_FILE);
        if !path.is_file() {
            tracing::debug!("No {} for family '{family}'", layout::PLATFORM_FILE);
            return Ok(None);
        }
        Ok(Some(read_config_file(&path)?))
    }

    fn family_dir(&self, family: &str, kind: FamilyDir) -> Option<PathBuf> {
        if self.single_tree && kind == FamilyDir::Libraries {
            // Pre-1.5 libraries live beside `hardware`, shared by the one family
            return (family == LEGACY_FAMILY).then(|| self.home.join(layout::LIBRARIES_DIR));
        }
        self.families.get(family).map(|dir| dir.join(kind.dir_name()))
    }

    fn tools_dir(&self, family: &str) -> Option<PathBuf> {
        let root = self.tools_root();
        match family {
            "avr" => Some(root.join("avr")),
            "sam" => Some(root.join(layout::ARM_TOOLCHAIN_DIR)).filter(|dir| dir.is_dir()),
            _ => None,
        }
    }
}
