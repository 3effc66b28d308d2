//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem reads, install discovery and
//! external processes. This module is the only place where side effects occur.

pub mod dirs;
pub mod filesystem;
pub mod install;
pub mod process;
