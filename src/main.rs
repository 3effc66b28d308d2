//! arduino-helpers CLI
//!
//! Entry point for the arduino-helpers command-line application.

use anyhow::Result;
use clap::Parser;

use arduino_helpers::cli::output::display_error;
use arduino_helpers::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = cli.output();

    // RUST_LOG directives are kept; the flags set the floor
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(output.log_directive().into()),
        )
        .init();

    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
