//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::collection::{btree_map, vec};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    use crate::core::node::ConfigNode;

    /// Generate a single identifier-style key segment
    pub fn key_segment() -> impl Strategy<Value = String> {
        "[a-z_][a-z0-9_]{0,6}"
    }

    /// Generate a dotted key of one to four segments
    pub fn dotted_key() -> impl Strategy<Value = String> {
        vec(key_segment(), 1..=4).prop_map(|segments| segments.join("."))
    }

    /// Generate a config value (no surrounding whitespace, no newlines)
    pub fn config_value() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_{}.=/ -]{0,16}".prop_map(|value| value.trim().to_string())
    }

    /// Generate unique `(dotted.key, value)` pairs where no key is a
    /// segment-prefix of another, so every pair is a distinct leaf
    pub fn config_pairs() -> impl Strategy<Value = BTreeMap<String, String>> {
        btree_map(dotted_key(), config_value(), 0..12).prop_map(|pairs| {
            let keys: Vec<String> = pairs.keys().cloned().collect();
            pairs
                .into_iter()
                .filter(|(key, _)| {
                    let prefix = format!("{key}.");
                    !keys.iter().any(|other| other.starts_with(&prefix))
                })
                .collect()
        })
    }

    /// Generate a nested configuration tree
    pub fn config_tree() -> impl Strategy<Value = ConfigNode> {
        config_pairs().prop_map(|pairs| {
            ConfigNode::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        })
    }

    /// Generate text that contains no `{` and therefore no placeholder
    pub fn placeholder_free_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_.}=/ \"-]{0,40}"
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_dotted_key_generator(key in dotted_key()) {
            prop_assert!(!key.is_empty());
            prop_assert!(key.split('.').all(|segment| !segment.is_empty()));
        }

        #[test]
        fn test_config_value_generator(value in config_value()) {
            prop_assert_eq!(value.trim(), value.as_str());
            prop_assert!(!value.contains('\n'));
        }

        #[test]
        fn test_config_pairs_have_no_prefix_keys(pairs in config_pairs()) {
            for key in pairs.keys() {
                let prefix = format!("{key}.");
                prop_assert!(!pairs.keys().any(|other| other.starts_with(&prefix)));
            }
        }
    }
}
