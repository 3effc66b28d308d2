//! External process execution
//!
//! Runs uploader command lines assembled by [`crate::core::upload`].

use std::process::Command;

use crate::core::upload::UploadCommand;
use crate::error::UploadError;

/// Run `command`, returning its combined stdout and stderr
///
/// The program is started directly, without a shell.
pub fn run_upload(command: &UploadCommand) -> Result<String, UploadError> {
    tracing::info!("Running {command}");

    let output = Command::new(&command.program)
        .args(command.args())
        .output()
        .map_err(|e| UploadError::Spawn {
            tool: command.program.display().to_string(),
            error: e.to_string(),
        })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(UploadError::ToolFailed {
            status: output.status.to_string(),
            output: combined,
        });
    }

    tracing::debug!("Upload output:\n{combined}");
    Ok(combined)
}
