//! Error types for arduino-helpers
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Variable lookup and substitution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Text passed to the single-variable resolver is not `{a.b.c}`
    #[error("Invalid variable \"{text}\"")]
    MalformedPlaceholder { text: String },

    /// Strict lookup hit a missing path segment
    #[error("Missing configuration key '{path}'")]
    MissingKey { path: String },

    /// Substitution never reached a fixed point
    ///
    /// `chain` holds the placeholders forming the cycle when one was found;
    /// it is empty when the round or length limit stopped substitution.
    #[error("Cyclic placeholder reference in '{template}'{}", cycle_note(.chain, .rounds))]
    CyclicPlaceholder {
        template: String,
        chain: Vec<String>,
        rounds: usize,
    },
}

fn cycle_note(chain: &[String], rounds: &usize) -> String {
    if chain.is_empty() {
        format!(" (no fixed point after {rounds} round(s))")
    } else {
        format!(": {}", chain.join(" -> "))
    }
}

/// Board-related errors
#[derive(Error, Debug)]
pub enum BoardError {
    /// Board not found in any family, and not a legacy board name either
    #[error("Board '{name}' not found")]
    NotFound { name: String },

    /// Board has several CPU variants and none was selected
    #[error(
        "Multiple CPU configurations are available for the board \"{board}\" so `cpu` must be specified (one of: {})",
        .cpus.join(", ")
    )]
    AmbiguousCpu { board: String, cpus: Vec<String> },

    /// CPU given for an install that predates CPU menus
    #[error("`cpu` ('{cpu}') is not valid for Arduino versions < 1.5")]
    CpuOnLegacyInstall { cpu: String },

    /// Family has no directory in the install
    #[error("Processor family '{family}' is not present in this Arduino install")]
    UnknownFamily { family: String },

    /// Missing required field
    #[error("Board '{board}' is missing required field '{field}'")]
    MissingField { board: String, field: String },

    /// Field present but not usable
    #[error("Board '{board}' has invalid value '{value}' for '{field}'")]
    InvalidField {
        board: String,
        field: String,
        value: String,
    },
}

/// Arduino install discovery errors
#[derive(Error, Debug)]
pub enum InstallError {
    /// `revisions.txt` present but without a recognizable version line
    #[error("Could not find an 'ARDUINO x.y.z' line in '{path}'")]
    BadRevisions { path: PathBuf },

    /// `platform.txt` requested from a pre-1.5 install
    #[error("Arduino < 1.5 does not provide `platform.txt` (install at '{path}')")]
    NoPlatformOnLegacy { path: PathBuf },

    /// Could not locate the user's documents directory
    #[error("Could not determine user `Documents` directory")]
    NoDocumentsDir,
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to list a directory
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },
}

/// Upload errors
#[derive(Error, Debug)]
pub enum UploadError {
    /// Only AVR boards can be flashed
    #[error("Upload not supported for board family `{family}`")]
    UnsupportedFamily { family: String },

    /// No `avrdude.conf` in the tools tree
    #[error("`avrdude.conf` not found (looked in {})", .searched.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    ConfigNotFound { searched: Vec<PathBuf> },

    /// Upload tool could not be started
    #[error("Failed to run '{tool}': {error}")]
    Spawn { tool: String, error: String },

    /// Upload tool exited with a failure status
    #[error("Upload tool exited with {status}:\n{output}")]
    ToolFailed { status: String, output: String },
}

/// Top-level arduino-helpers error type
#[derive(Error, Debug)]
pub enum ArduinoError {
    /// Resolve error
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Board error
    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    /// Install error
    #[error("Install error: {0}")]
    Install(#[from] InstallError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// Upload error
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),
}
