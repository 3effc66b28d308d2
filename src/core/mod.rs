//! Core business logic module
//!
//! Parsing, merging and resolving Arduino configuration files.
//! It has NO I/O operations - those belong in [`crate::infra`]; install
//! queries go through the [`install::Installation`] trait.
//!
//! # Submodules
//!
//! - [`node`] - Configuration tree type
//! - [`parser`] - `key=value` file parsing
//! - [`merge`] - Deep merge of configuration trees
//! - [`placeholder`] - `{a.b.c}` placeholder syntax
//! - [`resolver`] - Variable lookup, optionally scoped to a CPU
//! - [`substitute`] - Recursive placeholder substitution
//! - [`legacy`] - Pre-1.5 board name translation
//! - [`install`] - Install abstraction used by board assembly
//! - [`board`] - Board configuration assembly
//! - [`upload`] - Uploader and compiler command assembly

pub mod board;
pub mod install;
pub mod legacy;
pub mod merge;
pub mod node;
pub mod parser;
pub mod placeholder;
pub mod resolver;
pub mod substitute;
pub mod upload;
