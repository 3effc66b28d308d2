//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod boards;
pub mod dump;
pub mod info;
pub mod resolve;
pub mod upload;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use super::output::OutputConfig;
use crate::infra::install::ArduinoContext;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the boards of every processor family
    Boards,

    /// Substitute board variables in a template
    Resolve {
        /// Board name (pre-1.5 names such as `nano328` are accepted)
        board: String,

        /// Template text, e.g. `"{compiler.path}{compiler.c.cmd}"`
        template: String,

        /// CPU variant of the board
        #[arg(long)]
        cpu: Option<String>,

        /// Fail if any placeholder stays unresolved
        #[arg(long)]
        strict: bool,
    },

    /// Print a board's combined configuration
    Dump {
        /// Board name
        board: String,

        /// CPU variant of the board
        #[arg(long)]
        cpu: Option<String>,

        /// Show values, not just keys
        #[arg(long)]
        values: bool,
    },

    /// Flash a compiled sketch to an AVR board
    Upload {
        /// Board name
        board: String,

        /// Intel HEX file to write
        hex: PathBuf,

        /// Serial port, e.g. `/dev/ttyACM0` or `COM3`
        #[arg(short, long)]
        port: String,

        /// CPU variant of the board
        #[arg(long)]
        cpu: Option<String>,

        /// Skip verifying flash contents after writing
        #[arg(long)]
        skip_verify: bool,

        /// Print the uploader command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show install and build information
    Info,
}

impl Commands {
    /// Execute the command
    pub fn run(self, context: &ArduinoContext, output: OutputConfig) -> Result<()> {
        match self {
            Self::Boards => boards::execute(context, output),
            Self::Resolve {
                board,
                template,
                cpu,
                strict,
            } => resolve::execute(context, output, &board, cpu.as_deref(), &template, strict),
            Self::Dump { board, cpu, values } => {
                dump::execute(context, output, &board, cpu.as_deref(), values)
            }
            Self::Upload {
                board,
                hex,
                port,
                cpu,
                skip_verify,
                dry_run,
            } => {
                let options = upload::UploadOptions {
                    board,
                    cpu,
                    hex,
                    port,
                    verify: !skip_verify,
                    dry_run,
                };
                upload::execute(context, output, &options)
            }
            Self::Info => info::execute(context, output),
        }
    }
}
