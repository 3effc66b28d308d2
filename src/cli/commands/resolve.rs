//! CLI command implementation for `arduino-helpers resolve`

use anyhow::{bail, Result};
use serde::Serialize;

use crate::cli::output::OutputConfig;
use crate::core::board::Board;
use crate::infra::install::ArduinoContext;

#[derive(Serialize)]
struct ResolveReport<'a> {
    board: &'a str,
    cpu: Option<&'a str>,
    resolved: &'a str,
    unresolved: &'a [String],
}

/// Execute the resolve command
///
/// Prints the substituted template on stdout; leftover placeholders are
/// reported on stderr.
pub fn execute(
    context: &ArduinoContext,
    output: OutputConfig,
    board_name: &str,
    cpu: Option<&str>,
    template: &str,
    strict: bool,
) -> Result<()> {
    let board = Board::new(context, board_name, cpu)?;
    let resolution = board.resolve_recursive(template)?;

    if output.json {
        output.print_json(&ResolveReport {
            board: board.name(),
            cpu: board.cpu(),
            resolved: &resolution.resolved,
            unresolved: &resolution.unresolved,
        })?;
    } else {
        println!("{}", resolution.resolved);
        if !resolution.is_complete() {
            output.warning(&format!(
                "Unresolved: {}",
                resolution.unresolved.join(", ")
            ));
        }
    }

    if strict && !resolution.is_complete() {
        bail!(
            "{} placeholder(s) could not be resolved for board '{}'",
            resolution.unresolved.len(),
            board.name()
        );
    }
    Ok(())
}
