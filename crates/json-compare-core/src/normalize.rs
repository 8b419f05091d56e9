//! Key-order normalization.
//!
//! Reordering object keys before a review pass makes side-by-side reading
//! and text-level diffing of two documents feasible; the comparison engine
//! itself never depends on key order.

use serde_json::{Map, Value};

/// Recursively sort object keys alphabetically. Arrays keep their element
/// order, elements are normalized individually.
pub fn alphabetical(value: &Value) -> Value {
    match value {
        Value::Array(arr) => Value::Array(arr.iter().map(alphabetical).collect()),
        Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort_unstable();
            let mut out = Map::new();
            for key in keys {
                out.insert(key.clone(), alphabetical(&obj[key]));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// Recursively reorder object keys to follow `master`'s key order; keys the
/// master lacks are appended alphabetically.
///
/// Array elements are normalized against the positionally corresponding
/// master element, with the master's first element as template for surplus
/// positions. A non-object master degrades to alphabetical sorting.
pub fn by_master(value: &Value, master: &Value) -> Value {
    match value {
        Value::Array(arr) => {
            let master_items = master.as_array();
            Value::Array(
                arr.iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let template = master_items
                            .and_then(|m| m.get(index).or_else(|| m.first()))
                            .unwrap_or(&Value::Null);
                        by_master(item, template)
                    })
                    .collect(),
            )
        }
        Value::Object(obj) => {
            let master_obj = match master.as_object() {
                Some(m) => m,
                None => return alphabetical(value),
            };
            let mut out = Map::new();
            for (key, template) in master_obj {
                if let Some(child) = obj.get(key) {
                    out.insert(key.clone(), by_master(child, template));
                }
            }
            let mut remaining: Vec<&String> =
                obj.keys().filter(|k| !master_obj.contains_key(*k)).collect();
            remaining.sort_unstable();
            for key in remaining {
                out.insert(key.clone(), alphabetical(&obj[key]));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}
