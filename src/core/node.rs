//! Nested configuration tree
//!
//! Arduino configuration files are flat `dotted.key=value` records. They are
//! held as a tree whose interior nodes map a key segment to a child and whose
//! leaves are raw string values.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Children of an interior node, keyed by key segment
pub type ConfigTable = BTreeMap<String, ConfigNode>;

/// One node of a nested configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigNode {
    /// Raw value of a `key=value` line
    Leaf(String),
    /// Interior node
    Table(ConfigTable),
}

impl Default for ConfigNode {
    fn default() -> Self {
        Self::Table(ConfigTable::new())
    }
}

impl From<&str> for ConfigNode {
    fn from(value: &str) -> Self {
        Self::Leaf(value.to_string())
    }
}

impl From<String> for ConfigNode {
    fn from(value: String) -> Self {
        Self::Leaf(value)
    }
}

impl From<ConfigTable> for ConfigNode {
    fn from(table: ConfigTable) -> Self {
        Self::Table(table)
    }
}

impl ConfigNode {
    /// Create an empty interior node
    pub fn table() -> Self {
        Self::default()
    }

    /// Build a tree from `(dotted.path, value)` pairs
    ///
    /// Later pairs overwrite earlier ones at the same path.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut root = Self::table();
        for (path, value) in pairs {
            let segments: Vec<&str> = path.split('.').collect();
            root.set_path(&segments, Self::Leaf(value.to_string()));
        }
        root
    }

    /// Leaf value, if this is a leaf
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Table(_) => None,
        }
    }

    /// Children, if this is an interior node
    pub fn as_table(&self) -> Option<&ConfigTable> {
        match self {
            Self::Table(table) => Some(table),
            Self::Leaf(_) => None,
        }
    }

    /// Mutable children, if this is an interior node
    pub fn as_table_mut(&mut self) -> Option<&mut ConfigTable> {
        match self {
            Self::Table(table) => Some(table),
            Self::Leaf(_) => None,
        }
    }

    /// Whether this is an interior node
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }

    /// Direct child by key segment
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.as_table().and_then(|table| table.get(key))
    }

    /// Whether a direct child exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Child keys of an interior node (empty for leaves)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.as_table()
            .into_iter()
            .flat_map(|table| table.keys().map(String::as_str))
    }

    /// Walk the tree segment by segment
    ///
    /// Returns `None` as soon as a segment is missing or a leaf is reached
    /// before the path is exhausted.
    pub fn get_path<S: AsRef<str>>(&self, segments: &[S]) -> Option<&ConfigNode> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.get(segment.as_ref()))
    }

    /// Leaf value at a dotted path
    pub fn get_str(&self, dotted: &str) -> Option<&str> {
        let segments: Vec<&str> = dotted.split('.').collect();
        self.get_path(&segments).and_then(ConfigNode::as_str)
    }

    /// Store `value` at `segments`, creating interior nodes on the way
    ///
    /// A leaf standing where an interior node is needed is replaced.
    pub fn set_path<S: AsRef<str>>(&mut self, segments: &[S], value: ConfigNode) {
        let Some((last, parents)) = segments.split_last() else {
            *self = value;
            return;
        };

        let mut node = self;
        for segment in parents {
            if !node.is_table() {
                *node = Self::table();
            }
            node = match node {
                Self::Table(table) => table.entry(segment.as_ref().to_string()).or_default(),
                Self::Leaf(_) => unreachable!("node was just made a table"),
            };
        }

        if !node.is_table() {
            *node = Self::table();
        }
        if let Self::Table(table) = node {
            table.insert(last.as_ref().to_string(), value);
        }
    }

    /// Flatten back into `(dotted.path, value)` pairs, sorted by path
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        self.flatten_into(&mut Vec::new(), &mut pairs);
        pairs
    }

    fn flatten_into<'a>(&'a self, prefix: &mut Vec<&'a str>, out: &mut Vec<(String, String)>) {
        match self {
            Self::Leaf(value) => out.push((prefix.join("."), value.clone())),
            Self::Table(table) => {
                for (key, child) in table {
                    prefix.push(key);
                    child.flatten_into(prefix, out);
                    prefix.pop();
                }
            }
        }
    }

    /// Render the tree as an indented outline
    ///
    /// Bullets alternate between `-` and `*` with depth. With `values`, leaves
    /// are followed by their (trimmed) value in backticks.
    pub fn dump(&self, values: bool) -> String {
        let mut out = String::new();
        if let Self::Table(table) = self {
            dump_table(table, 0, values, &mut out);
        }
        out
    }
}

fn dump_table(table: &ConfigTable, depth: usize, values: bool, out: &mut String) {
    let bullet = if depth % 2 == 0 { '-' } else { '*' };
    for (key, child) in table {
        let _ = write!(out, " {}{bullet} {key}", "  ".repeat(depth));
        match child {
            ConfigNode::Table(children) => {
                out.push('\n');
                dump_table(children, depth + 1, values, out);
            }
            ConfigNode::Leaf(value) if values => {
                let _ = writeln!(out, ": `{}`", value.trim());
            }
            ConfigNode::Leaf(_) => out.push('\n'),
        }
    }
}
