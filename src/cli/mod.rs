//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::defaults::ENV_ARDUINO_HOME;
use crate::infra::dirs::arduino_home;
use crate::infra::install::ArduinoContext;
use commands::Commands;
use output::OutputConfig;

/// Arduino helpers - resolve board configuration from an Arduino install
///
/// Reads `boards.txt` and `platform.txt`, merges them with the IDE runtime
/// settings and substitutes `{...}` build variables.
#[derive(Parser, Debug)]
#[command(name = "arduino-helpers")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Arduino install directory
    #[arg(long, global = true, env = ENV_ARDUINO_HOME, value_name = "DIR")]
    pub arduino_home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Output settings from the global flags
    pub fn output(&self) -> OutputConfig {
        OutputConfig::new(self.quiet, self.json, self.verbose)
    }

    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let output = self.output();
        let Some(command) = self.command else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            return Ok(());
        };

        let home = arduino_home(self.arduino_home.as_deref());
        let context = ArduinoContext::new(&home)
            .with_context(|| format!("Failed to load Arduino install at {}", home.display()))?;
        command.run(&context, output)
    }
}
