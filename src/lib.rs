//! arduino-helpers - Arduino board configuration resolution
//!
//! This library reads the `boards.txt` and `platform.txt` files of an Arduino
//! install, layers them into one configuration tree per board and resolves
//! `{...}` build variables such as `{compiler.path}{compiler.c.cmd}`.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (no I/O operations)
//! - [`infra`] - Infrastructure layer (filesystem, processes)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling
//!
//! # Example
//!
//! ```no_run
//! use arduino_helpers::core::board::Board;
//! use arduino_helpers::infra::install::ArduinoContext;
//!
//! let context = ArduinoContext::new("/usr/share/arduino")?;
//! let board = Board::new(&context, "nano", Some("atmega328"))?;
//! let recipe = board.resolve_recursive("{compiler.path}{compiler.c.cmd} -mmcu={build.mcu}")?;
//! println!("{}", recipe.resolved);
//! # Ok::<(), arduino_helpers::error::ArduinoError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
