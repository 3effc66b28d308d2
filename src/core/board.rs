//! Board configuration assembly
//!
//! A [`Board`] owns the combined configuration for one board: its
//! `boards.txt` entry, with the IDE runtime info, the family's `platform.txt`
//! and a synthesized `build.*` layer merged in behind it. Values are resolved
//! through [`ScopedResolver`], so CPU-specific overrides always win.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::install::{expand_user, FamilyDir, Installation};
use super::legacy::resolve_legacy_board;
use super::merge::{merge, MergeConflict};
use super::node::ConfigNode;
use super::resolver::{ScopedResolver, CPU_MENU};
use super::substitute::{resolve_recursive, Resolution};
use crate::config::defaults::LEGACY_FAMILY;
use crate::config::layout;
use crate::error::{ArduinoError, BoardError, ResolveError};

/// Board names of one family's `boards.txt`
///
/// Only top-level tables with a `name` entry are boards; `boards.txt` also
/// holds entries like `menu.cpu=Processor`.
pub fn board_names(boards: &ConfigNode) -> Vec<&str> {
    boards
        .as_table()
        .into_iter()
        .flatten()
        .filter(|(_, board)| is_board(board))
        .map(|(name, _)| name.as_str())
        .collect()
}

fn is_board(node: &ConfigNode) -> bool {
    node.get("name").is_some_and(|name| !name.is_table())
}

/// A board with its fully layered configuration
#[derive(Debug, Clone)]
pub struct Board {
    name: String,
    family: String,
    cpu: Option<String>,
    config: ConfigNode,
    combined: ConfigNode,
    conflicts: Vec<MergeConflict>,
    dirs: BTreeMap<FamilyDir, PathBuf>,
}

impl Board {
    /// Look up `name` in `install` and build its combined configuration
    ///
    /// A pre-1.5 board name (e.g. `nano328`) is translated to its 1.5+ board
    /// and CPU when it is not found directly and no CPU was given.
    ///
    /// Fails when the board is unknown, when a CPU is given for a pre-1.5
    /// install, or when the board has CPU variants and none was chosen.
    pub fn new<I: Installation + ?Sized>(
        install: &I,
        name: &str,
        cpu: Option<&str>,
    ) -> Result<Self, ArduinoError> {
        if install.is_legacy() {
            if let Some(cpu) = cpu {
                return Err(BoardError::CpuOnLegacyInstall {
                    cpu: cpu.to_string(),
                }
                .into());
            }
        }

        let boards = install.boards_by_family()?;
        let (family, name, cpu) = locate(&boards, name, cpu)?;
        let config = boards
            .get(&family)
            .and_then(|family_boards| family_boards.get(&name))
            .filter(|board| is_board(board))
            .cloned()
            .ok_or_else(|| BoardError::NotFound { name: name.clone() })?;
        tracing::debug!("Found board '{name}' in family '{family}' (cpu: {cpu:?})");

        let dirs = FamilyDir::ALL
            .into_iter()
            .filter_map(|kind| install.family_dir(&family, kind).map(|dir| (kind, dir)))
            .collect();

        let mut board = Self {
            combined: config.clone(),
            config,
            name,
            family,
            cpu,
            conflicts: Vec::new(),
            dirs,
        };
        board.merge_layers(install)?;
        board.resolve_compiler_path(install)?;
        board.check_cpu_selected(install)?;
        Ok(board)
    }

    fn merge_layers<I: Installation + ?Sized>(&mut self, install: &I) -> Result<(), ArduinoError> {
        if let Some(runtime) = install.runtime_config() {
            self.merge_layer("runtime", runtime);
        }
        if let Some(platform) = install.platform(&self.family)? {
            self.merge_layer("platform", &platform);
        }

        let system_path = install
            .home()
            .join(layout::HARDWARE_DIR)
            .join(layout::ARDUINO_DIR)
            .join(self.family.to_lowercase())
            .join(layout::SYSTEM_DIR);
        let arch = self.family.to_uppercase();
        let system_path = system_path.to_string_lossy();
        let build = ConfigNode::from_pairs([
            ("build.arch", arch.as_str()),
            ("build.system.path", system_path.as_ref()),
        ]);
        self.merge_layer("build", &build);
        Ok(())
    }

    fn merge_layer(&mut self, layer: &str, source: &ConfigNode) {
        let conflicts = merge(&mut self.combined, source);
        tracing::debug!(
            "Merged {layer} layer into '{}' ({} conflict(s))",
            self.name,
            conflicts.len()
        );
        for conflict in &conflicts {
            tracing::warn!("{conflict}");
        }
        self.conflicts.extend(conflicts);
    }

    fn resolve_compiler_path<I: Installation + ?Sized>(&mut self, install: &I) -> Result<(), ResolveError> {
        let template = format!(
            "{{runtime.ide.path}}/{}/{}/{}/bin",
            layout::HARDWARE_DIR,
            layout::TOOLS_DIR,
            self.family.to_lowercase()
        );
        let resolution = self.resolve_recursive(&template)?;
        if !resolution.is_complete() {
            tracing::debug!("No compiler directory for '{}': {:?} unresolved", self.name, resolution.unresolved);
            return Ok(());
        }

        let dir = expand_user(&resolution.resolved, install.user_home().as_deref());
        if install.is_dir(&dir) {
            let path = format!("{}/", dir.to_string_lossy().trim_end_matches('/'));
            tracing::debug!("Compiler directory for '{}': {path}", self.name);
            self.combined
                .set_path(&["compiler", "path"], ConfigNode::Leaf(path));
        }
        Ok(())
    }

    fn check_cpu_selected<I: Installation + ?Sized>(&self, install: &I) -> Result<(), BoardError> {
        if install.is_legacy() || self.cpu.is_some() {
            return Ok(());
        }
        if let Some(menu) = self.combined.get_path(&CPU_MENU) {
            return Err(BoardError::AmbiguousCpu {
                board: self.name.clone(),
                cpus: menu.keys().map(String::from).collect(),
            });
        }
        Ok(())
    }

    /// Board name (1.5+ naming)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Processor family, e.g. `avr`
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Selected CPU variant
    pub fn cpu(&self) -> Option<&str> {
        self.cpu.as_deref()
    }

    /// The board's own `boards.txt` entry
    pub fn config(&self) -> &ConfigNode {
        &self.config
    }

    /// All layers merged
    pub fn combined_config(&self) -> &ConfigNode {
        &self.combined
    }

    /// Conflicts seen while layering, in merge order
    pub fn conflicts(&self) -> &[MergeConflict] {
        &self.conflicts
    }

    /// Resolver over the combined configuration for this board's CPU
    pub fn resolver(&self) -> ScopedResolver<'_> {
        ScopedResolver::new(&self.combined, self.cpu.as_deref())
    }

    /// Resolve a single variable such as `{build.mcu}`
    pub fn resolve(&self, var: &str) -> Result<Option<&ConfigNode>, ResolveError> {
        self.resolver().resolve(var)
    }

    /// Resolve a single variable, also searching `extra` tables
    pub fn resolve_with<'a>(
        &'a self,
        var: &str,
        extra: &[&'a ConfigNode],
    ) -> Result<Option<&'a ConfigNode>, ResolveError> {
        extra
            .iter()
            .fold(self.resolver(), |resolver, table| resolver.with_extra(table))
            .resolve(var)
    }

    /// Substitute every `{...}` in `template`
    pub fn resolve_recursive(&self, template: &str) -> Result<Resolution, ResolveError> {
        resolve_recursive(&self.resolver(), template)
    }

    /// Substitute every `{...}` in `template`, also searching `extra` tables
    pub fn resolve_recursive_with(
        &self,
        template: &str,
        extra: &[&ConfigNode],
    ) -> Result<Resolution, ResolveError> {
        let resolver = extra
            .iter()
            .fold(self.resolver(), |resolver, table| resolver.with_extra(table));
        resolve_recursive(&resolver, template)
    }

    /// A string field of this board, CPU-specific value first
    pub fn field(&self, dotted: &str) -> Result<&str, BoardError> {
        self.resolve(&format!("{{{dotted}}}"))
            .ok()
            .flatten()
            .and_then(ConfigNode::as_str)
            .ok_or_else(|| BoardError::MissingField {
                board: self.name.clone(),
                field: dotted.to_string(),
            })
    }

    /// Microcontroller, e.g. `atmega328p`
    pub fn mcu(&self) -> Result<&str, BoardError> {
        self.field("build.mcu")
    }

    /// Resolved compiler directory, when it exists on disk
    pub fn compiler_path(&self) -> Option<&str> {
        self.combined.get_str("compiler.path")
    }

    /// One of the family directories
    pub fn family_dir(&self, kind: FamilyDir) -> Result<&Path, BoardError> {
        self.dirs
            .get(&kind)
            .map(PathBuf::as_path)
            .ok_or_else(|| BoardError::UnknownFamily {
                family: self.family.clone(),
            })
    }

    /// Source directory of the board's core (`cores/<build.core>`)
    pub fn core_dir(&self) -> Result<PathBuf, BoardError> {
        let core = self.field("build.core")?;
        Ok(self.family_dir(FamilyDir::Cores)?.join(core))
    }

    /// Family library directory
    pub fn libraries_dir(&self) -> Result<&Path, BoardError> {
        self.family_dir(FamilyDir::Libraries)
    }

    /// Family variants directory
    pub fn variants_dir(&self) -> Result<&Path, BoardError> {
        self.family_dir(FamilyDir::Variants)
    }

    /// Family firmwares directory
    pub fn firmwares_dir(&self) -> Result<&Path, BoardError> {
        self.family_dir(FamilyDir::Firmwares)
    }

    /// Family bootloaders directory
    pub fn bootloaders_dir(&self) -> Result<&Path, BoardError> {
        self.family_dir(FamilyDir::Bootloaders)
    }
}

/// Find the family of `name`, falling back to the legacy name table
fn locate(
    boards: &BTreeMap<String, ConfigNode>,
    name: &str,
    cpu: Option<&str>,
) -> Result<(String, String, Option<String>), BoardError> {
    let found = boards
        .iter()
        .find(|(_, family_boards)| family_boards.get(name).is_some_and(is_board));
    if let Some((family, _)) = found {
        return Ok((family.clone(), name.to_string(), cpu.map(String::from)));
    }

    if cpu.is_none() {
        if let Some(legacy) = resolve_legacy_board(name) {
            tracing::info!(
                "Translated legacy board '{name}' to '{}' (cpu: {:?})",
                legacy.board,
                legacy.cpu
            );
            return Ok((
                LEGACY_FAMILY.to_string(),
                legacy.board.to_string(),
                legacy.cpu.map(String::from),
            ));
        }
    }

    Err(BoardError::NotFound {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::install::fake::FakeInstall;

    const AVR_BOARDS: &str = r"
menu.cpu=Processor

uno.name=Arduino Uno
uno.upload.protocol=arduino
uno.upload.speed=115200
uno.build.mcu=atmega328p
uno.build.core=arduino
uno.build.board=AVR_UNO

nano.name=Arduino Nano
nano.upload.protocol=arduino
nano.build.core=arduino
nano.menu.cpu.atmega328=ATmega328
nano.menu.cpu.atmega328.upload.speed=57600
nano.menu.cpu.atmega328.build.mcu=atmega328p
nano.menu.cpu.atmega168=ATmega168
nano.menu.cpu.atmega168.upload.speed=19200
nano.menu.cpu.atmega168.build.mcu=atmega168
";

    const AVR_PLATFORM: &str = r#"
name=Arduino AVR Boards
compiler.path={runtime.ide.path}/hardware/tools/avr/bin/
compiler.c.cmd=avr-gcc
compiler.c.flags=-c -g -Os -ffunction-sections
recipe.c.o.pattern="{compiler.path}{compiler.c.cmd}" {compiler.c.flags} -mmcu={build.mcu} -DARDUINO_{build.board} -DARDUINO_ARCH_{build.arch}
"#;

    const SAM_BOARDS: &str = r"
arduino_due_x.name=Arduino Due (Native USB Port)
arduino_due_x.build.mcu=cortex-m3
arduino_due_x.build.core=arduino
";

    fn install() -> FakeInstall {
        FakeInstall::new("/opt/arduino")
            .with_boards("avr", AVR_BOARDS)
            .with_boards("sam", SAM_BOARDS)
            .with_platform("avr", AVR_PLATFORM)
            .with_dir("/opt/arduino/hardware/tools/avr/bin")
    }

    #[test]
    fn test_board_names_skip_menu_labels() {
        let boards = crate::core::parser::parse_config_str(AVR_BOARDS);
        assert_eq!(board_names(&boards), vec!["nano", "uno"]);
    }

    #[test]
    fn test_layers_merged() {
        let board = Board::new(&install(), "uno", None).unwrap();

        assert_eq!(board.family(), "avr");
        assert_eq!(board.cpu(), None);
        let combined = board.combined_config();
        assert_eq!(combined.get_str("build.mcu"), Some("atmega328p"));
        assert_eq!(combined.get_str("runtime.ide.path"), Some("/opt/arduino"));
        assert_eq!(combined.get_str("compiler.c.cmd"), Some("avr-gcc"));
        assert_eq!(combined.get_str("build.arch"), Some("AVR"));
        assert_eq!(
            combined.get_str("build.system.path"),
            Some("/opt/arduino/hardware/arduino/avr/system")
        );
    }

    #[test]
    fn test_board_layer_wins_conflicts() {
        let board = Board::new(&install(), "uno", None).unwrap();
        assert_eq!(board.combined_config().get_str("name"), Some("Arduino Uno"));
        assert!(board
            .conflicts()
            .iter()
            .any(|conflict| conflict.path == "name"));
    }

    #[test]
    fn test_compiler_path_recorded_when_dir_exists() {
        let board = Board::new(&install(), "uno", None).unwrap();
        assert_eq!(board.compiler_path(), Some("/opt/arduino/hardware/tools/avr/bin/"));
    }

    #[test]
    fn test_compiler_path_expands_user_home() {
        let mut install = FakeInstall::new("~/arduino-1.6.5")
            .with_boards("avr", AVR_BOARDS)
            .with_dir("/home/maker/arduino-1.6.5/hardware/tools/avr/bin");
        install.user_home = Some(PathBuf::from("/home/maker"));
        let board = Board::new(&install, "uno", None).unwrap();
        assert_eq!(
            board.compiler_path(),
            Some("/home/maker/arduino-1.6.5/hardware/tools/avr/bin/")
        );
    }

    #[test]
    fn test_compiler_path_absent_without_dir() {
        let install = FakeInstall::new("/opt/arduino").with_boards("sam", SAM_BOARDS);
        let board = Board::new(&install, "arduino_due_x", None).unwrap();
        assert_eq!(board.compiler_path(), None);
    }

    #[test]
    fn test_compiler_path_untouched_without_runtime() {
        let mut install = install();
        install.runtime = None;
        let board = Board::new(&install, "uno", None).unwrap();
        // platform.txt still carries its own unresolved entry
        assert_eq!(
            board.compiler_path(),
            Some("{runtime.ide.path}/hardware/tools/avr/bin/")
        );
    }

    #[test]
    fn test_recipe_resolves() {
        let board = Board::new(&install(), "uno", None).unwrap();
        let recipe = board.combined_config().get_str("recipe.c.o.pattern").unwrap();
        let resolution = board.resolve_recursive(recipe).unwrap();
        assert_eq!(
            resolution.resolved,
            "\"/opt/arduino/hardware/tools/avr/bin/avr-gcc\" -c -g -Os -ffunction-sections \
             -mmcu=atmega328p -DARDUINO_AVR_UNO -DARDUINO_ARCH_AVR"
        );
        assert!(resolution.is_complete());
    }

    #[test]
    fn test_cpu_variant_values() {
        let board = Board::new(&install(), "nano", Some("atmega168")).unwrap();
        assert_eq!(board.mcu().unwrap(), "atmega168");
        assert_eq!(board.field("upload.speed").unwrap(), "19200");
        assert_eq!(board.field("upload.protocol").unwrap(), "arduino");
    }

    #[test]
    fn test_ambiguous_cpu() {
        let err = Board::new(&install(), "nano", None).unwrap_err();
        match err {
            ArduinoError::Board(BoardError::AmbiguousCpu { board, cpus }) => {
                assert_eq!(board, "nano");
                assert_eq!(cpus, vec!["atmega168", "atmega328"]);
            }
            other => panic!("expected AmbiguousCpu, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_name_translated() {
        let board = Board::new(&install(), "nano328", None).unwrap();
        assert_eq!(board.name(), "nano");
        assert_eq!(board.family(), "avr");
        assert_eq!(board.cpu(), Some("atmega328"));
        assert_eq!(board.field("upload.speed").unwrap(), "57600");
    }

    #[test]
    fn test_legacy_uno_falls_back_to_avr() {
        // No family lists `uno`, so the legacy table decides
        let boards = BTreeMap::from([(
            "sam".to_string(),
            crate::core::parser::parse_config_str(SAM_BOARDS),
        )]);
        let (family, name, cpu) = locate(&boards, "uno", None).unwrap();
        assert_eq!((family.as_str(), name.as_str(), cpu), ("avr", "uno", None));
    }

    #[test]
    fn test_legacy_target_missing_from_install() {
        let install = FakeInstall::new("/opt/arduino").with_boards("sam", SAM_BOARDS);
        let err = Board::new(&install, "uno", None).unwrap_err();
        assert!(matches!(err, ArduinoError::Board(BoardError::NotFound { .. })));
    }

    #[test]
    fn test_unknown_board() {
        let err = Board::new(&install(), "teensy31", None).unwrap_err();
        assert!(matches!(
            err,
            ArduinoError::Board(BoardError::NotFound { name }) if name == "teensy31"
        ));
    }

    #[test]
    fn test_unknown_board_with_cpu_skips_legacy_table() {
        let err = Board::new(&install(), "nano328", Some("atmega328")).unwrap_err();
        assert!(matches!(err, ArduinoError::Board(BoardError::NotFound { .. })));
    }

    #[test]
    fn test_menu_label_is_not_a_board() {
        let err = Board::new(&install(), "menu", None).unwrap_err();
        assert!(matches!(err, ArduinoError::Board(BoardError::NotFound { .. })));
    }

    #[test]
    fn test_cpu_rejected_on_legacy_install() {
        let mut install = install();
        install.legacy = true;
        let err = Board::new(&install, "nano", Some("atmega328")).unwrap_err();
        assert!(matches!(
            err,
            ArduinoError::Board(BoardError::CpuOnLegacyInstall { .. })
        ));
    }

    #[test]
    fn test_legacy_install_skips_platform_and_cpu_check() {
        let mut install = install();
        install.legacy = true;
        let board = Board::new(&install, "nano", None).unwrap();
        assert_eq!(board.combined_config().get_str("compiler.c.cmd"), None);
    }

    #[test]
    fn test_family_dirs() {
        let board = Board::new(&install(), "uno", None).unwrap();
        assert_eq!(
            board.core_dir().unwrap(),
            PathBuf::from("/opt/arduino/hardware/arduino/avr/cores/arduino")
        );
        assert_eq!(
            board.variants_dir().unwrap(),
            Path::new("/opt/arduino/hardware/arduino/avr/variants")
        );
        assert!(board.libraries_dir().is_ok());
        assert!(board.bootloaders_dir().is_ok());
        assert!(board.firmwares_dir().is_ok());
    }

    #[test]
    fn test_resolve_with_extra_table() {
        let board = Board::new(&install(), "uno", None).unwrap();
        let extra = ConfigNode::from_pairs([("serial.port", "/dev/ttyACM0")]);
        let resolution = board
            .resolve_recursive_with("-P {serial.port} -p {build.mcu}", &[&extra])
            .unwrap();
        assert_eq!(resolution.resolved, "-P /dev/ttyACM0 -p atmega328p");
        assert_eq!(
            board
                .resolve_with("{serial.port}", &[&extra])
                .unwrap()
                .and_then(ConfigNode::as_str),
            Some("/dev/ttyACM0")
        );
    }

    #[test]
    fn test_missing_field() {
        let board = Board::new(&install(), "uno", None).unwrap();
        assert!(matches!(
            board.field("upload.maximum_size"),
            Err(BoardError::MissingField { .. })
        ));
    }
}
