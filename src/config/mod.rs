//! Configuration and constants
//!
//! - [`defaults`] - Compiled-in defaults and environment variable names
//! - [`layout`] - Relative paths inside an Arduino install

pub mod defaults;
pub mod layout;
