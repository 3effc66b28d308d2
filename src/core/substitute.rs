//! Recursive placeholder substitution
//!
//! Configuration values refer to each other, e.g.
//! `recipe.c.o.pattern="{compiler.path}{compiler.c.cmd}" {compiler.c.flags}`
//! where `compiler.c.flags` itself contains `{build.mcu}`. References are
//! checked for cycles first; substitution is then repeated until the
//! placeholders left in the text stop changing between two rounds.

use std::collections::BTreeSet;

use super::node::ConfigNode;
use super::placeholder::{find_all, find_distinct, Placeholder};
use super::resolver::ScopedResolver;
use crate::config::defaults::{MAX_SUBSTITUTED_LEN, MAX_SUBSTITUTION_ROUNDS};
use crate::error::ResolveError;

/// Result of substituting a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Template with every resolvable placeholder replaced
    pub resolved: String,
    /// Placeholders that could not be resolved to a string, in order of
    /// first appearance
    pub unresolved: Vec<String>,
}

impl Resolution {
    /// Whether every placeholder was resolved
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Run a single substitution pass
///
/// Each distinct placeholder is resolved once and all its occurrences are
/// replaced. Placeholders without a value, or whose value is a table, are
/// left in place and reported as unresolved.
pub fn substitute_once(resolver: &ScopedResolver<'_>, template: &str) -> Resolution {
    let mut resolved = template.to_string();
    let mut unresolved = Vec::new();

    for text in find_distinct(template) {
        let value = Placeholder::parse(text)
            .ok()
            .and_then(|placeholder| resolver.lookup(&placeholder))
            .and_then(ConfigNode::as_str);
        match value {
            Some(value) => resolved = resolved.replace(text, value),
            None => unresolved.push(text.to_string()),
        }
    }

    Resolution {
        resolved,
        unresolved,
    }
}

/// Substitute placeholders until a fixed point is reached
///
/// Single quotes are stripped from the final text; upstream values such as
/// `'-DUSB_PRODUCT="Arduino Due"'` carry them as escaping artifacts.
///
/// Fails with [`ResolveError::CyclicPlaceholder`] when a placeholder's value
/// leads back to that placeholder, when the text keeps changing for
/// [`MAX_SUBSTITUTION_ROUNDS`] rounds, or when it grows past
/// [`MAX_SUBSTITUTED_LEN`] bytes.
pub fn resolve_recursive(
    resolver: &ScopedResolver<'_>,
    template: &str,
) -> Result<Resolution, ResolveError> {
    resolve_recursive_with_limit(resolver, template, MAX_SUBSTITUTION_ROUNDS)
}

/// [`resolve_recursive`] with an explicit round limit
pub fn resolve_recursive_with_limit(
    resolver: &ScopedResolver<'_>,
    template: &str,
    max_rounds: usize,
) -> Result<Resolution, ResolveError> {
    if let Some(chain) = find_cycle(resolver, template, &mut Vec::new(), &mut BTreeSet::new()) {
        tracing::debug!("Cyclic placeholders in '{template}': {}", chain.join(" -> "));
        return Err(cyclic(template, chain, 0));
    }

    let mut current = substitute_once(resolver, template);
    let mut remaining: Vec<String> = owned(find_all(&current.resolved));
    let mut rounds = 1;

    loop {
        if rounds >= max_rounds || current.resolved.len() > MAX_SUBSTITUTED_LEN {
            return Err(cyclic(template, Vec::new(), rounds));
        }

        current = substitute_once(resolver, &current.resolved);
        rounds += 1;

        let previous = std::mem::replace(&mut remaining, owned(find_all(&current.resolved)));
        tracing::trace!(round = rounds, remaining = ?remaining, "Substitution round");
        if previous == remaining {
            break;
        }
    }

    // Settled, yet something left in the text still resolves: it expands to itself
    if let Some(text) = remaining.iter().find(|text| !current.unresolved.contains(text)) {
        tracing::debug!("Placeholder {text} in '{template}' refers to itself");
        return Err(cyclic(template, vec![text.clone(), text.clone()], rounds));
    }

    tracing::debug!(rounds, unresolved = ?current.unresolved, "Resolved '{template}'");
    Ok(Resolution {
        resolved: current.resolved.replace('\'', ""),
        unresolved: current.unresolved,
    })
}

/// Walk the placeholder references reachable from `text`
///
/// Returns the reference chain of the first cycle found, e.g.
/// `["{a}", "{b}", "{a}"]`. `stack` holds the placeholders being expanded,
/// `done` those whose expansion is known to be acyclic.
fn find_cycle(
    resolver: &ScopedResolver<'_>,
    text: &str,
    stack: &mut Vec<String>,
    done: &mut BTreeSet<String>,
) -> Option<Vec<String>> {
    for found in find_distinct(text) {
        if let Some(start) = stack.iter().position(|open| open == found) {
            let mut chain = stack[start..].to_vec();
            chain.push(found.to_string());
            return Some(chain);
        }
        if done.contains(found) {
            continue;
        }
        let value = Placeholder::parse(found)
            .ok()
            .and_then(|placeholder| resolver.lookup(&placeholder))
            .and_then(ConfigNode::as_str);
        if let Some(value) = value {
            stack.push(found.to_string());
            if let Some(chain) = find_cycle(resolver, value, stack, done) {
                return Some(chain);
            }
            stack.pop();
        }
        done.insert(found.to_string());
    }
    None
}

fn cyclic(template: &str, chain: Vec<String>, rounds: usize) -> ResolveError {
    ResolveError::CyclicPlaceholder {
        template: template.to_string(),
        chain,
        rounds,
    }
}

fn owned(found: Vec<&str>) -> Vec<String> {
    found.into_iter().map(String::from).collect()
}
