//! CLI command implementation for `arduino-helpers dump`

use anyhow::Result;

use crate::cli::output::OutputConfig;
use crate::core::board::Board;
use crate::infra::install::ArduinoContext;

/// Execute the dump command
///
/// Prints the board's combined configuration as a bullet tree, or as nested
/// JSON objects with `--json`.
pub fn execute(
    context: &ArduinoContext,
    output: OutputConfig,
    board_name: &str,
    cpu: Option<&str>,
    values: bool,
) -> Result<()> {
    let board = Board::new(context, board_name, cpu)?;

    if output.json {
        return output.print_json(board.combined_config());
    }

    print!("{}", board.combined_config().dump(values));
    if !board.conflicts().is_empty() {
        output.warning(&format!(
            "{} conflicting value(s) ignored while merging; run with -v for details",
            board.conflicts().len()
        ));
    }
    Ok(())
}
