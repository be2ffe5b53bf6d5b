//! Property-based tests for the mapping engine
//!
//! These verify the round-trip law for reversible specifications and that
//! the path resolver is total (never panics) over arbitrary inputs.

use proptest::prelude::*;
use serde_json::{json, Value};

use remap_core::mapping::path;
use remap_core::{map, MapOptions, MappingEntry, MappingSpec};

/// Scalar JSON leaves (no NaN-prone floats; mapping carries values as-is)
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ]
}

fn json_value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 12, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::hash_map("[a-z_][a-z0-9_]{0,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Dotted/bracketed paths without wildcards
fn plain_path_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            "[a-z][a-z0-9_]{0,6}".prop_map(|s| (s, false)),
            (0usize..4).prop_map(|i| (i.to_string(), true)),
        ],
        1..4,
    )
    .prop_map(|segments| {
        let mut out = String::new();
        for (i, (segment, is_index)) in segments.iter().enumerate() {
            if *is_index {
                out.push_str(&format!("[{segment}]"));
            } else {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(segment);
            }
        }
        out
    })
}

/// Paths that may contain wildcard segments anywhere
fn wildcard_path_strategy() -> impl Strategy<Value = String> {
    (plain_path_strategy(), plain_path_strategy(), 0usize..3).prop_map(
        |(head, tail, wildcards)| match wildcards {
            0 => head,
            1 => format!("{head}[].{tail}"),
            _ => format!("{head}[].{tail}[]"),
        },
    )
}

/// Flat source objects and the rename spec covering every key
fn rename_case_strategy() -> impl Strategy<Value = (Value, MappingSpec)> {
    proptest::collection::btree_map("[a-z][a-z0-9]{0,6}", leaf_strategy(), 1..6).prop_map(
        |fields| {
            let entries = fields
                .keys()
                .map(|key| {
                    MappingEntry::new(
                        Some(key.as_str().into()),
                        Some(format!("mapped_{key}").into()),
                    )
                })
                .collect();
            let source = Value::Object(fields.into_iter().collect());
            (source, MappingSpec::new(true, entries))
        },
    )
}

proptest! {
    /// Round-trip law: forward then reverse reconstructs the source for
    /// plain-path reversible specifications covering every source key
    #[test]
    fn prop_flat_rename_round_trips((source, spec) in rename_case_strategy()) {
        let forward = map(&source, &spec, MapOptions::default()).unwrap();
        let back = map(&forward, &spec, MapOptions::reversed()).unwrap();
        prop_assert_eq!(back, source);
    }

    /// Mapping never mutates its inputs
    #[test]
    fn prop_source_is_left_untouched((source, spec) in rename_case_strategy()) {
        let snapshot = source.clone();
        let _ = map(&source, &spec, MapOptions::default());
        prop_assert_eq!(source, snapshot);
    }

    /// Plain set-then-get is the identity
    #[test]
    fn prop_set_then_get(path in plain_path_strategy(), value in leaf_strategy()) {
        let mut doc = json!({});
        path::set_path(&mut doc, &path, value.clone());
        prop_assert_eq!(path::get_path(&doc, &path), Some(&value));
    }

    /// The resolver is total: reads never panic on arbitrary documents
    #[test]
    fn prop_get_never_panics(path in wildcard_path_strategy(), doc in json_value_strategy()) {
        if path.contains("[]") {
            let _ = path::get_wildcard(&doc, &path);
        } else {
            let _ = path::get_path(&doc, &path);
        }
    }

    /// The resolver is total: writes never panic on arbitrary values
    #[test]
    fn prop_set_never_panics(path in wildcard_path_strategy(), value in json_value_strategy()) {
        let mut doc = json!({});
        if path.contains("[]") {
            let _ = path::set_wildcard(&mut doc, &path, value);
        } else {
            path::set_path(&mut doc, &path, value);
        }
    }
}
