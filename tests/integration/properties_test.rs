//! Property tests for loading and saving variable sets
//!
//! These tests check ordering on load and the save rules (dropped rows,
//! inherited entries, last-write-wins) over generated documents.

use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use vars_editor::models::{TaggedVariable, VariableSet, Vars};

/// A scalar of any JSON type, as found inside lists and maps.
fn element() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9]{0,5}".prop_map(Value::String),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        any::<bool>().prop_map(Value::Bool),
        Just(Value::Null),
    ]
}

/// A JSON value that is not empty for its kind.
fn saved_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9]{1,8}".prop_map(Value::String),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::Bool),
        prop::collection::vec(element(), 1..4).prop_map(Value::Array),
        prop::collection::btree_map("[a-z]{0,4}", element(), 1..4)
            .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
    ]
}

/// Any JSON value the editor classifies, including empty ones.
fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        saved_value(),
        Just(Value::String(String::new())),
        Just(Value::Null),
        Just(Value::Array(Vec::new())),
        Just(Value::Object(Map::new())),
    ]
}

fn tagged(key: String, value: Value, tag: Option<String>) -> TaggedVariable {
    TaggedVariable {
        key,
        value,
        tag,
        href: None,
    }
}

proptest! {
    #[test]
    fn map_shaped_load_orders_by_key(vars in prop::collection::btree_map("[a-zA-Z_]{0,6}", any_value(), 0..10)) {
        let map: Map<String, Value> = vars.clone().into_iter().collect();
        let set = VariableSet::from_vars(&Vars::Map(map));

        let keys: Vec<String> = set.iter().map(|e| e.key().to_string()).collect();
        let expected: Vec<String> = vars.keys().cloned().collect();
        prop_assert_eq!(keys, expected);
        prop_assert!(set.iter().all(|e| !e.is_inherited()));
    }

    #[test]
    fn list_shaped_load_preserves_order_and_tags(
        items in prop::collection::vec(("[a-z]{0,4}", any_value(), prop::option::of("[a-z]{0,3}")), 0..10)
    ) {
        let list: Vec<TaggedVariable> = items
            .iter()
            .cloned()
            .map(|(key, value, tag)| tagged(key, value, tag))
            .collect();
        let set = VariableSet::from_vars(&Vars::List(list));

        prop_assert_eq!(set.len(), items.len());
        for (entry, (key, _, tag)) in set.iter().zip(items.iter()) {
            prop_assert_eq!(entry.key(), key.as_str());
            let tagged = tag.as_deref().is_some_and(|t| !t.is_empty());
            prop_assert_eq!(entry.is_inherited(), tagged);
        }
    }

    #[test]
    fn unmodified_entries_round_trip(vars in prop::collection::btree_map("[a-z]{1,6}", saved_value(), 0..10)) {
        let map: Map<String, Value> = vars.into_iter().collect();
        let set = VariableSet::from_vars(&Vars::Map(map.clone()));
        prop_assert_eq!(set.to_vars(), map);
    }

    #[test]
    fn incomplete_rows_are_dropped(
        items in prop::collection::vec(("[a-z]{0,3}", any_value()), 0..10)
    ) {
        let list: Vec<TaggedVariable> = items
            .iter()
            .cloned()
            .map(|(key, value)| tagged(key, value, None))
            .collect();
        let set = VariableSet::from_vars(&Vars::List(list));
        let saved = set.to_vars();

        for (key, value) in &saved {
            prop_assert!(!key.is_empty());
            let empty = match value {
                Value::Null => true,
                Value::String(s) => s.is_empty(),
                Value::Array(a) => a.is_empty(),
                Value::Object(o) => o.is_empty(),
                _ => false,
            };
            prop_assert!(!empty);
        }

        let expected_keys: std::collections::BTreeSet<&str> = set
            .iter()
            .filter(|e| !e.key().is_empty() && !e.value().is_empty())
            .map(|e| e.key())
            .collect();
        let saved_keys: std::collections::BTreeSet<&str> = saved.keys().map(String::as_str).collect();
        prop_assert_eq!(saved_keys, expected_keys);
    }

    #[test]
    fn inherited_entries_are_never_saved(
        items in prop::collection::vec(("[a-z]{1,3}", saved_value()), 1..8),
        tag in "[a-z]{1,5}"
    ) {
        let list: Vec<TaggedVariable> = items
            .into_iter()
            .map(|(key, value)| tagged(key, value, Some(tag.clone())))
            .collect();
        let set = VariableSet::from_vars(&Vars::List(list));
        prop_assert!(set.to_vars().is_empty());
    }

    #[test]
    fn duplicate_keys_keep_last_value(
        items in prop::collection::vec(("[ab]", saved_value()), 1..10)
    ) {
        let mut last: BTreeMap<String, Value> = BTreeMap::new();
        for (key, value) in &items {
            last.insert(key.clone(), value.clone());
        }

        let list: Vec<TaggedVariable> = items
            .into_iter()
            .map(|(key, value)| tagged(key, value, None))
            .collect();
        let saved = VariableSet::from_vars(&Vars::List(list)).to_vars();

        prop_assert_eq!(saved.len(), last.len());
        for (key, value) in &last {
            prop_assert_eq!(saved.get(key), Some(value));
        }
    }
}
