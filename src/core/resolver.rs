//! Variable lookup
//!
//! Resolves a single placeholder against a configuration tree. The scoped
//! resolver adds the board CPU rule: `{build.mcu}` is first looked up as
//! `menu.cpu.<cpu>.build.mcu` and only then as `build.mcu`.

use super::node::ConfigNode;
use super::placeholder::Placeholder;
use crate::error::ResolveError;

/// Key segments that scope a value to one CPU variant
pub const CPU_MENU: [&str; 2] = ["menu", "cpu"];

/// What to do when a path segment is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupMode {
    /// Missing paths resolve to `None`
    #[default]
    Optional,
    /// Missing paths are a [`ResolveError::MissingKey`]
    Strict,
}

/// Look up a placeholder in `config`
pub fn lookup<'a>(
    config: &'a ConfigNode,
    placeholder: &Placeholder,
    mode: LookupMode,
) -> Result<Option<&'a ConfigNode>, ResolveError> {
    let mut node = config;
    for (depth, segment) in placeholder.segments().iter().enumerate() {
        match node.get(segment) {
            Some(child) => node = child,
            None if mode == LookupMode::Strict => {
                return Err(ResolveError::MissingKey {
                    path: placeholder.segments()[..=depth].join("."),
                });
            }
            None => return Ok(None),
        }
    }
    Ok(Some(node))
}

/// Parse `{a.b.c}` and look it up in `config`
///
/// Malformed variable text fails with [`ResolveError::MalformedPlaceholder`].
pub fn resolve<'a>(
    config: &'a ConfigNode,
    var: &str,
    mode: LookupMode,
) -> Result<Option<&'a ConfigNode>, ResolveError> {
    let placeholder = Placeholder::parse(var)?;
    lookup(config, &placeholder, mode)
}

/// Board-aware resolver
///
/// Searches the combined configuration first, then any extra tables in the
/// order they were added. In each table a CPU-scoped value beats the unscoped
/// one.
#[derive(Debug, Clone)]
pub struct ScopedResolver<'a> {
    config: &'a ConfigNode,
    cpu: Option<&'a str>,
    extra: Vec<&'a ConfigNode>,
}

impl<'a> ScopedResolver<'a> {
    /// Create a resolver over `config` for an optional CPU variant
    pub fn new(config: &'a ConfigNode, cpu: Option<&'a str>) -> Self {
        Self {
            config,
            cpu,
            extra: Vec::new(),
        }
    }

    /// Also search `table` after everything added so far
    #[must_use]
    pub fn with_extra(mut self, table: &'a ConfigNode) -> Self {
        self.extra.push(table);
        self
    }

    /// CPU variant this resolver is scoped to
    pub fn cpu(&self) -> Option<&str> {
        self.cpu
    }

    /// Resolve a placeholder; the value may be a leaf or a whole table
    pub fn lookup(&self, placeholder: &Placeholder) -> Option<&'a ConfigNode> {
        std::iter::once(self.config)
            .chain(self.extra.iter().copied())
            .find_map(|table| self.lookup_in(table, placeholder))
    }

    /// Resolve variable text such as `{build.mcu}`
    pub fn resolve(&self, var: &str) -> Result<Option<&'a ConfigNode>, ResolveError> {
        let placeholder = Placeholder::parse(var)?;
        Ok(self.lookup(&placeholder))
    }

    /// Resolve variable text that must exist
    pub fn require(&self, var: &str) -> Result<&'a ConfigNode, ResolveError> {
        let placeholder = Placeholder::parse(var)?;
        self.lookup(&placeholder)
            .ok_or_else(|| ResolveError::MissingKey {
                path: placeholder.path(),
            })
    }

    fn lookup_in(&self, table: &'a ConfigNode, placeholder: &Placeholder) -> Option<&'a ConfigNode> {
        if let Some(cpu) = self.cpu {
            let scoped = placeholder.under(&[CPU_MENU[0], CPU_MENU[1], cpu]);
            if let Some(value) = table.get_path(scoped.segments()) {
                return Some(value);
            }
        }
        table.get_path(placeholder.segments())
    }
}
