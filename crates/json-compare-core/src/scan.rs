//! Tree scanners that seed the selection workflow.
//!
//! `scan_properties` flattens both documents into the bracket-free path list
//! a Selection Set is built from; `available_key_options` records, per array
//! path, which fields qualify for manual identity-key choice.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::keys;
use crate::path::join_key;

/// One scanned property path with its per-side presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    pub path: String,
    pub in_a: bool,
    pub in_b: bool,
}

/// Bracket-free property paths of one tree, in encounter order.
///
/// Arrays are traversed without contributing a segment, so every element's
/// fields collapse onto the array's own path.
pub fn extract_properties(tree: &Value) -> IndexSet<String> {
    let mut paths = IndexSet::new();
    walk_properties(tree, "", &mut paths);
    paths
}

fn walk_properties(value: &Value, path: &str, out: &mut IndexSet<String>) {
    match value {
        Value::Array(arr) => {
            for item in arr {
                if item.is_object() || item.is_array() {
                    walk_properties(item, path, out);
                }
            }
        }
        Value::Object(obj) => {
            for (key, child) in obj {
                let current = join_key(path, key);
                match child {
                    Value::Object(_) | Value::Array(_) => {
                        out.insert(current.clone());
                        walk_properties(child, &current, out);
                    }
                    _ => {
                        out.insert(current);
                    }
                }
            }
        }
        _ => {}
    }
}

/// Merge the property paths of both documents, sorted by path.
pub fn scan_properties(a: &Value, b: &Value) -> Vec<PropertyRecord> {
    let paths_a = extract_properties(a);
    let paths_b = extract_properties(b);

    let mut records: IndexMap<&String, PropertyRecord> = IndexMap::new();
    for path in &paths_a {
        records.insert(
            path,
            PropertyRecord {
                path: path.clone(),
                in_a: true,
                in_b: false,
            },
        );
    }
    for path in &paths_b {
        records
            .entry(path)
            .and_modify(|record| record.in_b = true)
            .or_insert_with(|| PropertyRecord {
                path: path.clone(),
                in_a: false,
                in_b: true,
            });
    }

    let mut records: Vec<PropertyRecord> = records.into_values().collect();
    records.sort_by(|x, y| x.path.cmp(&y.path));
    records
}

/// The Available Key Set of one array: fields present in every object
/// element with a primitive value.
pub fn find_available_keys(arr: &[Value]) -> IndexSet<String> {
    let objects = keys::object_elements(arr);
    if objects.is_empty() {
        return IndexSet::new();
    }
    let mut in_all: Option<IndexSet<String>> = None;
    for obj in &objects {
        let obj_keys: IndexSet<String> = obj.keys().cloned().collect();
        in_all = Some(match in_all {
            None => obj_keys,
            Some(prev) => prev.intersection(&obj_keys).cloned().collect(),
        });
    }
    in_all
        .unwrap_or_default()
        .into_iter()
        .filter(|key| {
            objects
                .iter()
                .all(|obj| obj.get(key).is_some_and(keys::is_primitive))
        })
        .collect()
}

/// Available Key Sets for every array path of one tree.
///
/// Nested arrays keep their parent array's path, matching the bracket-free
/// path convention of the selection model.
pub fn collect_array_key_options(tree: &Value) -> IndexMap<String, IndexSet<String>> {
    let mut options = IndexMap::new();
    collect_options(tree, "", &mut options);
    options
}

fn collect_options(value: &Value, path: &str, out: &mut IndexMap<String, IndexSet<String>>) {
    match value {
        Value::Array(arr) => {
            if arr.iter().any(Value::is_object) {
                let available = find_available_keys(arr);
                if !available.is_empty() {
                    out.entry(path.to_string()).or_default().extend(available);
                }
            }
            for item in arr {
                if item.is_object() || item.is_array() {
                    collect_options(item, path, out);
                }
            }
        }
        Value::Object(obj) => {
            for (key, child) in obj {
                if child.is_object() || child.is_array() {
                    let current = join_key(path, key);
                    collect_options(child, &current, out);
                }
            }
        }
        _ => {}
    }
}

/// Union of both trees' Available Key Sets per array path.
pub fn available_key_options(a: &Value, b: &Value) -> IndexMap<String, IndexSet<String>> {
    let mut options = collect_array_key_options(a);
    for (path, available) in collect_array_key_options(b) {
        options.entry(path).or_default().extend(available);
    }
    options
}
