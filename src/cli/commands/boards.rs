//! CLI command implementation for `arduino-helpers boards`

use anyhow::Result;

use crate::cli::output::OutputConfig;
use crate::infra::install::ArduinoContext;

/// Execute the boards command
///
/// Lists board names grouped by processor family.
pub fn execute(context: &ArduinoContext, output: OutputConfig) -> Result<()> {
    let names = context.board_names_by_family()?;

    if output.json {
        return output.print_json(&names);
    }

    if names.values().all(Vec::is_empty) {
        output.warning("No boards found in this install.");
        return Ok(());
    }

    let mut total = 0;
    for (family, boards) in &names {
        println!("{family}:");
        for board in boards {
            println!("  {board}");
        }
        total += boards.len();
    }

    if !output.quiet {
        println!();
        println!("{total} board(s) in {} family(ies).", names.len());
    }
    Ok(())
}
