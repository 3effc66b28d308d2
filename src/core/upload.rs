//! Uploader and compiler command assembly
//!
//! Builds the command line for flashing a board; running it is left to
//! [`crate::infra::process`].

use std::fmt;
use std::path::{Path, PathBuf};

use super::board::Board;
use super::install::Installation;
use crate::config::defaults::DEFAULT_UPLOAD_TOOL;
use crate::config::layout;
use crate::error::{ArduinoError, BoardError, UploadError};

/// Families whose boards can be flashed
const UPLOAD_FAMILIES: &[&str] = &["avr"];

/// Ordered command-line flags; `None` values are bare switches
pub type Flags = Vec<(String, Option<String>)>;

/// A fully assembled upload command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCommand {
    /// Uploader binary
    pub program: PathBuf,
    /// Flags in order
    pub flags: Flags,
}

impl UploadCommand {
    /// Arguments as passed to the process
    pub fn args(&self) -> Vec<String> {
        self.flags
            .iter()
            .flat_map(|(flag, value)| std::iter::once(flag.clone()).chain(value.clone()))
            .collect()
    }
}

impl fmt::Display for UploadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.program.display())?;
        for (flag, value) in &self.flags {
            match value {
                Some(value) => write!(f, " {flag} \"{value}\"")?,
                None => write!(f, " {flag}")?,
            }
        }
        Ok(())
    }
}

/// Upload settings for one board
#[derive(Debug)]
pub struct Uploader<'a> {
    board: &'a Board,
    tool: String,
    tools_dir: PathBuf,
    bin_dir: PathBuf,
    conf_candidates: Vec<PathBuf>,
    conf_path: Option<PathBuf>,
}

impl<'a> Uploader<'a> {
    /// Collect upload settings for `board`
    ///
    /// The upload tool is `upload.tool` from the board, `avrdude` if unset.
    pub fn new<I: Installation + ?Sized>(board: &'a Board, install: &I) -> Result<Self, ArduinoError> {
        let tool = board
            .field("upload.tool")
            .unwrap_or(DEFAULT_UPLOAD_TOOL)
            .to_string();
        let tools_dir = install
            .tools_dir(board.family())
            .ok_or_else(|| BoardError::UnknownFamily {
                family: board.family().to_string(),
            })?;
        let bin_dir = install
            .compiler_dir(board.family())
            .unwrap_or_else(|| tools_dir.join("bin"));

        let conf_candidates = vec![
            tools_dir.join("etc").join(layout::AVRDUDE_CONF),
            install.tools_root().join(layout::AVRDUDE_CONF),
        ];
        let conf_path = conf_candidates
            .iter()
            .find(|candidate| install.is_file(candidate))
            .cloned();

        Ok(Self {
            board,
            tool,
            tools_dir,
            bin_dir,
            conf_candidates,
            conf_path,
        })
    }

    /// Upload tool name, e.g. `avrdude` or `bossac`
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Family toolchain directory
    pub fn tools_dir(&self) -> &Path {
        &self.tools_dir
    }

    /// Upload tool binary
    pub fn bin(&self) -> PathBuf {
        let name = if cfg!(windows) {
            format!("{}.exe", self.tool)
        } else {
            self.tool.clone()
        };
        self.bin_dir.join(name)
    }

    /// `avrdude.conf` for avrdude uploads; `None` for other tools
    pub fn conf_path(&self) -> Result<Option<&Path>, UploadError> {
        if self.tool != DEFAULT_UPLOAD_TOOL {
            return Ok(None);
        }
        self.conf_path
            .as_deref()
            .map(Some)
            .ok_or_else(|| UploadError::ConfigNotFound {
                searched: self.conf_candidates.clone(),
            })
    }

    /// Upload protocol, e.g. `arduino` or `wiring`
    pub fn protocol(&self) -> Result<&str, BoardError> {
        self.board.field("upload.protocol")
    }

    /// Upload baud rate
    pub fn speed(&self) -> Result<u32, BoardError> {
        self.parsed("upload.speed")
    }

    /// Largest sketch the board accepts, in bytes
    pub fn maximum_size(&self) -> Result<u64, BoardError> {
        self.parsed("upload.maximum_size")
    }

    fn parsed<T: std::str::FromStr>(&self, field: &str) -> Result<T, BoardError> {
        let value = self.board.field(field)?;
        value.trim().parse().map_err(|_| BoardError::InvalidField {
            board: self.board.name().to_string(),
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    /// Base flags: config file, protocol, part and baud rate
    pub fn flags(&self) -> Result<Flags, ArduinoError> {
        let mut flags = Flags::new();
        if let Some(conf) = self.conf_path()? {
            flags.push(("-C".into(), Some(conf.display().to_string())));
        }
        flags.push(("-c".into(), Some(self.protocol()?.to_string())));
        flags.push(("-p".into(), Some(self.board.mcu()?.to_string())));
        flags.push(("-b".into(), Some(self.speed()?.to_string())));
        Ok(flags)
    }

    /// Flags the Arduino IDE adds on top of [`Self::flags`]
    ///
    /// `-D` disables the automatic flash erase.
    pub fn arduino_extra_flags() -> Flags {
        vec![("-D".into(), None)]
    }

    /// Full command for writing `hex_file` through `port`
    ///
    /// `hex_file` should be absolute; it is embedded in the `-U` flag as is.
    pub fn upload_command(
        &self,
        hex_file: &Path,
        port: &str,
        verify: bool,
    ) -> Result<UploadCommand, ArduinoError> {
        let family = self.board.family();
        if !UPLOAD_FAMILIES.contains(&family) {
            return Err(UploadError::UnsupportedFamily {
                family: family.to_string(),
            }
            .into());
        }

        let mut flags = self.flags()?;
        flags.extend(Self::arduino_extra_flags());
        flags.push(("-P".into(), Some(port.to_string())));
        if !verify {
            flags.push(("-V".into(), None));
        }
        flags.push((
            "-U".into(),
            Some(format!("flash:w:{}:i", hex_file.display())),
        ));

        Ok(UploadCommand {
            program: self.bin(),
            flags,
        })
    }
}

/// Compiler binaries for one board family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiler {
    bin_dir: PathBuf,
    prefix: &'static str,
}

impl Compiler {
    /// Compiler layout for `board`
    pub fn new<I: Installation + ?Sized>(board: &Board, install: &I) -> Result<Self, BoardError> {
        let unknown = || BoardError::UnknownFamily {
            family: board.family().to_string(),
        };
        let prefix = match board.family() {
            "avr" => "avr-",
            "sam" => "arm-none-eabi-",
            _ => return Err(unknown()),
        };
        let bin_dir = install.compiler_dir(board.family()).ok_or_else(unknown)?;
        Ok(Self { bin_dir, prefix })
    }

    /// Directory holding the compiler binaries
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Binary name prefix, e.g. `avr-`
    pub fn prefix(&self) -> &str {
        self.prefix
    }

    /// Prefix as a path (`<bin_dir>/avr-`)
    pub fn bin_prefix(&self) -> PathBuf {
        self.bin_dir.join(self.prefix)
    }

    /// Path of one tool, e.g. `tool("gcc")` for `avr-gcc`
    pub fn tool(&self, name: &str) -> PathBuf {
        self.bin_dir.join(format!("{}{name}", self.prefix))
    }
}
