//! `boards.txt` / `platform.txt` parsing
//!
//! Turns flat `dotted.key=value` lines into a [`ConfigNode`] tree.

use std::collections::BTreeMap;

use super::node::{ConfigNode, ConfigTable};

/// Parse Arduino-formatted configuration text
///
/// Blank lines and `#` comments are skipped, as are lines without `=`.
/// Everything before the first `=` is the key, split on `.`; everything after
/// is the value. Both are trimmed, and an empty value is kept as an empty leaf.
///
/// Lines are sorted before grouping, so when the same key appears twice the
/// lexicographically smaller line wins, and when a key is both a leaf and a
/// prefix of longer keys (`a=1`, `a.b=2`) the longer keys win.
pub fn parse_config<'a>(lines: impl IntoIterator<Item = &'a str>) -> ConfigNode {
    let mut records: Vec<&str> = lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    records.sort_unstable();

    let entries: Vec<(Vec<&str>, &str)> = records
        .into_iter()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                tracing::debug!("Skipping config line with empty key: {line}");
                return None;
            }
            Some((key.split('.').map(str::trim).collect(), value.trim()))
        })
        .collect();

    group(&entries)
}

/// Parse configuration text held in a single string
pub fn parse_config_str(content: &str) -> ConfigNode {
    parse_config(content.lines())
}

/// Group entries by leading key segment and recurse on the remainder
fn group(entries: &[(Vec<&str>, &str)]) -> ConfigNode {
    // Only a bare value is left at this path: first one wins
    if !entries.is_empty() && entries.iter().all(|(segments, _)| segments.is_empty()) {
        return ConfigNode::Leaf(entries[0].1.to_string());
    }

    let mut groups: BTreeMap<&str, Vec<(Vec<&str>, &str)>> = BTreeMap::new();
    for (segments, value) in entries {
        if let Some((head, rest)) = segments.split_first() {
            groups
                .entry(*head)
                .or_default()
                .push((rest.to_vec(), *value));
        }
    }

    let table: ConfigTable = groups
        .into_iter()
        .map(|(key, children)| (key.to_string(), group(&children)))
        .collect();
    ConfigNode::Table(table)
}
