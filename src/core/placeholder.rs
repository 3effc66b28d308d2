//! `{dotted.path}` placeholders
//!
//! A placeholder is `{` + one or more `.`-separated identifier segments + `}`,
//! each segment matching `[a-zA-Z_][a-zA-Z_0-9]*`. There is no nesting, no
//! default-value syntax and no whitespace inside the braces.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::ResolveError;

const SEGMENT: &str = r"[a-zA-Z_][a-zA-Z_0-9]*";

/// Unanchored matcher used to scan templates
fn scan_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"\{{{SEGMENT}(?:\.{SEGMENT})*\}}"))
            .expect("placeholder scan pattern is valid")
    })
}

/// Anchored matcher for a lone dotted path
fn path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^{SEGMENT}(?:\.{SEGMENT})*$"))
            .expect("placeholder path pattern is valid")
    })
}

/// A parsed placeholder
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    segments: Vec<String>,
}

impl Placeholder {
    /// Parse `{a.b.c}`
    ///
    /// Fails with [`ResolveError::MalformedPlaceholder`] unless the whole text
    /// matches the placeholder grammar.
    pub fn parse(text: &str) -> Result<Self, ResolveError> {
        text.strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .and_then(|path| Self::from_path(path).ok())
            .ok_or_else(|| ResolveError::MalformedPlaceholder {
                text: text.to_string(),
            })
    }

    /// Parse a bare dotted path `a.b.c`
    pub fn from_path(path: &str) -> Result<Self, ResolveError> {
        if !path_regex().is_match(path) {
            return Err(ResolveError::MalformedPlaceholder {
                text: path.to_string(),
            });
        }
        Ok(Self {
            segments: path.split('.').map(String::from).collect(),
        })
    }

    /// Key segments, outermost first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Dotted path without braces
    pub fn path(&self) -> String {
        self.segments.join(".")
    }

    /// The same path below `prefix`
    ///
    /// Prefix segments are taken verbatim; they come from configuration keys
    /// (such as a CPU name) and need not be identifiers.
    pub fn under<S: AsRef<str>>(&self, prefix: &[S]) -> Self {
        Self {
            segments: prefix
                .iter()
                .map(|segment| segment.as_ref().to_string())
                .chain(self.segments.iter().cloned())
                .collect(),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.path())
    }
}

impl std::str::FromStr for Placeholder {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Every placeholder occurrence in `text`, in order, duplicates included
///
/// Text that does not fit the grammar (`{}`, `{a b}`, `{1x}`, an unbalanced
/// `{`) is not a placeholder and is skipped.
pub fn find_all(text: &str) -> Vec<&str> {
    scan_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Distinct placeholders in `text`, in order of first appearance
pub fn find_distinct(text: &str) -> Vec<&str> {
    let mut seen = Vec::new();
    for found in find_all(text) {
        if !seen.contains(&found) {
            seen.push(found);
        }
    }
    seen
}
