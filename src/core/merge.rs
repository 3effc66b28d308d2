//! Deep merge of configuration layers
//!
//! Layers are merged into a running combined configuration. The target always
//! wins: the source only fills gaps. Disagreements are returned as
//! [`MergeConflict`] diagnostics instead of failing the merge.

use std::fmt;

use super::node::{ConfigNode, ConfigTable};

/// A path where target and source disagree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    /// Dotted path of the conflicting key
    pub path: String,
    /// Value kept in the target
    pub existing: ConfigNode,
    /// Value from the source that was ignored
    pub incoming: ConfigNode,
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Conflict at {}: keeping {}, ignoring {}",
            self.path,
            describe(&self.existing),
            describe(&self.incoming)
        )
    }
}

fn describe(node: &ConfigNode) -> String {
    match node {
        ConfigNode::Leaf(value) => format!("`{value}`"),
        ConfigNode::Table(table) => format!("table with {} key(s)", table.len()),
    }
}

/// Merge `source` into `target`
///
/// - keys only in `source` are copied over with their subtree
/// - tables present on both sides are merged recursively
/// - equal leaves are left alone
/// - anything else (two different leaves, or a leaf against a table) is a
///   conflict: `target` keeps its value and the conflict is reported
///
/// On return every key path present in `source` is present in `target`,
/// except below conflicting paths.
pub fn merge(target: &mut ConfigNode, source: &ConfigNode) -> Vec<MergeConflict> {
    let mut conflicts = Vec::new();
    match (target, source) {
        (ConfigNode::Table(target), ConfigNode::Table(source)) => {
            merge_tables(target, source, &mut Vec::new(), &mut conflicts);
        }
        (target, source) if *target == *source => {}
        (target, source) => conflicts.push(MergeConflict {
            path: String::new(),
            existing: target.clone(),
            incoming: source.clone(),
        }),
    }
    conflicts
}

/// Merge `source` into `target`, returning `target` for chaining
pub fn merged(mut target: ConfigNode, source: &ConfigNode) -> (ConfigNode, Vec<MergeConflict>) {
    let conflicts = merge(&mut target, source);
    (target, conflicts)
}

fn merge_tables<'a>(
    target: &mut ConfigTable,
    source: &'a ConfigTable,
    path: &mut Vec<&'a str>,
    conflicts: &mut Vec<MergeConflict>,
) {
    for (key, incoming) in source {
        let Some(existing) = target.get_mut(key) else {
            target.insert(key.clone(), incoming.clone());
            continue;
        };

        path.push(key);
        match (existing, incoming) {
            (ConfigNode::Table(existing), ConfigNode::Table(incoming)) => {
                merge_tables(existing, incoming, path, conflicts);
            }
            (existing, incoming) if *existing == *incoming => {}
            (existing, incoming) => conflicts.push(MergeConflict {
                path: path.join("."),
                existing: existing.clone(),
                incoming: incoming.clone(),
            }),
        }
        path.pop();
    }
}
