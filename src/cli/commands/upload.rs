//! CLI command implementation for `arduino-helpers upload`

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::output::{create_spinner, OutputConfig};
use crate::core::board::Board;
use crate::core::upload::Uploader;
use crate::infra::install::ArduinoContext;
use crate::infra::process::run_upload;

/// Options for the upload command
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub board: String,
    pub cpu: Option<String>,
    pub hex: PathBuf,
    pub port: String,
    pub verify: bool,
    pub dry_run: bool,
}

/// Execute the upload command
pub fn execute(context: &ArduinoContext, output: OutputConfig, options: &UploadOptions) -> Result<()> {
    let board = Board::new(context, &options.board, options.cpu.as_deref())?;
    let uploader = Uploader::new(&board, context)?;

    let hex = options
        .hex
        .canonicalize()
        .with_context(|| format!("Hex file not found: {}", options.hex.display()))?;
    let command = uploader.upload_command(&hex, &options.port, options.verify)?;

    if options.dry_run {
        println!("{command}");
        return Ok(());
    }

    let spinner = output
        .show_progress()
        .then(|| create_spinner(&format!("Uploading to {} on {}...", board.name(), options.port)));

    let result = run_upload(&command);
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }
    let log = result?;

    if output.verbose > 0 {
        eprintln!("{log}");
    }
    output.success(&format!(
        "Uploaded {} to {} ({})",
        hex.display(),
        board.name(),
        options.port
    ));
    Ok(())
}
