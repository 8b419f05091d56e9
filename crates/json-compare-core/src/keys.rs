//! Identity-key discovery for array reconciliation.
//!
//! Arrays of objects are matched by the value of one or more identity keys
//! instead of by position. The key list is either declared manually per array
//! path or discovered automatically: candidates are fields present in every
//! object element of both sides with primitive values, preferred in a fixed
//! order (priority singles, other singles, 2-combinations, 3-combinations,
//! first candidate as a last resort), where a combination qualifies once its
//! composite value is duplicate-free on either side.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::stable;

/// Default priority order for single-key candidates.
///
/// Mixes English and German identifier conventions; override via
/// [`DiffOptions`] when the documents name their identifiers differently.
pub const DEFAULT_PRIORITY_KEYS: [&str; 6] = ["id", "name", "vorname", "key", "_id", "uuid"];

/// Per-array matching mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArrayKeySetting {
    /// Discover identity keys automatically.
    #[default]
    Auto,
    /// Force positional (index) comparison.
    Positional,
    /// Match by the declared keys, in order.
    Manual(Vec<String>),
}

/// Snapshot of per-array-path settings, keyed by bracket-free path.
///
/// Owned and mutated by the selection UI; the core only reads it. Absence of
/// a path means [`ArrayKeySetting::Auto`].
#[derive(Debug, Clone, Default)]
pub struct ArrayKeySettings {
    settings: IndexMap<String, ArrayKeySetting>,
}

impl ArrayKeySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, path: impl Into<String>, setting: ArrayKeySetting) {
        self.settings.insert(path.into(), setting);
    }

    pub fn get(&self, path: &str) -> &ArrayKeySetting {
        self.settings.get(path).unwrap_or(&ArrayKeySetting::Auto)
    }
}

/// Injectable heuristic configuration.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Single keys tried first during automatic discovery, in order.
    pub priority_keys: Vec<String>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            priority_keys: DEFAULT_PRIORITY_KEYS.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// The object elements of an array, in order. Arrays and null are not
/// objects and never participate in key-based matching.
pub(crate) fn object_elements(arr: &[Value]) -> Vec<&Map<String, Value>> {
    arr.iter().filter_map(Value::as_object).collect()
}

/// Automatic identity-key discovery over both sides of an array pairing.
///
/// Returns `None` when either side has no object elements or no candidate
/// survives the primitive-value filter. The result is deterministic for
/// identical inputs; ambiguity between equally valid candidates is resolved
/// by the documented preference order, never surfaced as an error.
pub fn find_common_keys(
    arr_a: &[Value],
    arr_b: &[Value],
    options: &DiffOptions,
) -> Option<Vec<String>> {
    let objects_a = object_elements(arr_a);
    let objects_b = object_elements(arr_b);
    if objects_a.is_empty() || objects_b.is_empty() {
        return None;
    }

    let in_all_a = keys_in_all_objects(&objects_a);
    let in_all_b = keys_in_all_objects(&objects_b);
    let candidates: Vec<&str> = in_all_a
        .iter()
        .filter(|k| in_all_b.contains(k.as_str()))
        .map(String::as_str)
        .filter(|key| {
            objects_a
                .iter()
                .chain(objects_b.iter())
                .all(|obj| obj.get(*key).is_some_and(is_primitive))
        })
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let unique_either = |combo: &[&str]| {
        composite_unique(&objects_a, combo) || composite_unique(&objects_b, combo)
    };
    let owned = |combo: &[&str]| combo.iter().map(|k| (*k).to_string()).collect();

    // 1. Priority single key.
    for pk in &options.priority_keys {
        if candidates.contains(&pk.as_str()) && unique_either(&[pk.as_str()]) {
            return Some(vec![pk.clone()]);
        }
    }
    // 2. Any other single key.
    for key in &candidates {
        if unique_either(&[*key]) {
            return Some(owned(&[*key]));
        }
    }
    // 3. First unique 2-combination.
    for i in 0..candidates.len() {
        for j in i + 1..candidates.len() {
            let combo = [candidates[i], candidates[j]];
            if unique_either(&combo) {
                return Some(owned(&combo));
            }
        }
    }
    // 4. First unique 3-combination.
    for i in 0..candidates.len() {
        for j in i + 1..candidates.len() {
            for k in j + 1..candidates.len() {
                let combo = [candidates[i], candidates[j], candidates[k]];
                if unique_either(&combo) {
                    return Some(owned(&combo));
                }
            }
        }
    }
    // 5. Fallback: first candidate, even without a uniqueness proof.
    Some(vec![candidates[0].to_string()])
}

// Keys present in every object, in first-object order.
fn keys_in_all_objects(objects: &[&Map<String, Value>]) -> IndexSet<String> {
    let mut common: Option<IndexSet<String>> = None;
    for obj in objects {
        let keys: IndexSet<String> = obj.keys().cloned().collect();
        common = Some(match common {
            None => keys,
            Some(prev) => prev.intersection(&keys).cloned().collect(),
        });
    }
    common.unwrap_or_default()
}

/// String, number, or boolean. Null and containers are not usable as
/// identity-key values.
pub(crate) fn is_primitive(value: &Value) -> bool {
    matches!(
        value,
        Value::String(_) | Value::Number(_) | Value::Bool(_)
    )
}

/// True when no two objects share the same composite value for `keys`.
pub(crate) fn composite_unique<K: AsRef<str>>(objects: &[&Map<String, Value>], keys: &[K]) -> bool {
    let mut seen = HashSet::with_capacity(objects.len());
    objects
        .iter()
        .all(|obj| seen.insert(composite_key(obj, keys)))
}

/// Composite identity of one object: the stringified key values joined with
/// a separator no primitive value produces.
pub(crate) fn composite_key<K: AsRef<str>>(obj: &Map<String, Value>, keys: &[K]) -> String {
    keys.iter()
        .map(|k| obj.get(k.as_ref()).map(composite_value).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("|||")
}

// Missing and null both collapse to the empty string inside a composite.
fn composite_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => stable::stringify(other),
    }
}

/// The bracket body reported for a key-matched element, e.g. `id=7` or
/// `domain=learning,policyName=read`.
pub(crate) fn key_match_segment<K: AsRef<str>>(obj: &Map<String, Value>, keys: &[K]) -> String {
    keys.iter()
        .map(|k| {
            let name = k.as_ref();
            let value = obj.get(name).map(segment_value).unwrap_or_default();
            format!("{name}={value}")
        })
        .collect::<Vec<_>>()
        .join(",")
}

// Unlike composites, path segments render null visibly.
fn segment_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => stable::stringify(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn arr(value: Value) -> Vec<Value> {
        value.as_array().cloned().unwrap()
    }

    #[test]
    fn settings_default_to_auto() {
        let mut settings = ArrayKeySettings::new();
        assert_eq!(settings.get("anything"), &ArrayKeySetting::Auto);
        settings.set("list", ArrayKeySetting::Positional);
        assert_eq!(settings.get("list"), &ArrayKeySetting::Positional);
    }

    #[test]
    fn priority_key_wins() {
        let a = arr(json!([{"id": 1, "x": "a"}, {"id": 2, "x": "a"}]));
        let b = arr(json!([{"id": 1, "x": "b"}]));
        assert_eq!(
            find_common_keys(&a, &b, &DiffOptions::default()),
            Some(vec!["id".to_string()])
        );
    }

    #[test]
    fn non_priority_single_key() {
        let a = arr(json!([{"code": "x"}, {"code": "y"}]));
        let b = arr(json!([{"code": "x"}]));
        assert_eq!(
            find_common_keys(&a, &b, &DiffOptions::default()),
            Some(vec!["code".to_string()])
        );
    }

    #[test]
    fn duplicate_single_falls_back_to_pair() {
        // Neither `a` nor `b` is unique alone on either side, but together
        // they are.
        let left = arr(json!([
            {"a": 1, "b": 1},
            {"a": 1, "b": 2},
            {"a": 2, "b": 1}
        ]));
        let right = arr(json!([
            {"a": 1, "b": 1},
            {"a": 1, "b": 2},
            {"a": 2, "b": 1}
        ]));
        assert_eq!(
            find_common_keys(&left, &right, &DiffOptions::default()),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn uniqueness_on_one_side_suffices() {
        let left = arr(json!([{"id": 1}, {"id": 1}]));
        let right = arr(json!([{"id": 1}, {"id": 2}]));
        assert_eq!(
            find_common_keys(&left, &right, &DiffOptions::default()),
            Some(vec!["id".to_string()])
        );
    }

    #[test]
    fn non_primitive_values_disqualify() {
        let a = arr(json!([{"id": {"n": 1}, "tag": "x"}]));
        let b = arr(json!([{"id": {"n": 1}, "tag": "y"}]));
        assert_eq!(
            find_common_keys(&a, &b, &DiffOptions::default()),
            Some(vec!["tag".to_string()])
        );
    }

    #[test]
    fn null_values_disqualify() {
        let a = arr(json!([{"id": null, "tag": "x"}]));
        let b = arr(json!([{"id": null, "tag": "y"}]));
        assert_eq!(
            find_common_keys(&a, &b, &DiffOptions::default()),
            Some(vec!["tag".to_string()])
        );
    }

    #[test]
    fn no_shared_keys_yields_none() {
        let a = arr(json!([{"x": 1}]));
        let b = arr(json!([{"y": 1}]));
        assert_eq!(find_common_keys(&a, &b, &DiffOptions::default()), None);
    }

    #[test]
    fn primitive_arrays_yield_none() {
        let a = arr(json!([1, 2, 3]));
        let b = arr(json!([4, 5]));
        assert_eq!(find_common_keys(&a, &b, &DiffOptions::default()), None);
    }

    #[test]
    fn fallback_without_uniqueness_proof() {
        let a = arr(json!([{"v": 1}, {"v": 1}]));
        let b = arr(json!([{"v": 1}, {"v": 1}]));
        assert_eq!(
            find_common_keys(&a, &b, &DiffOptions::default()),
            Some(vec!["v".to_string()])
        );
    }

    #[test]
    fn custom_priority_list() {
        let options = DiffOptions {
            priority_keys: vec!["sku".to_string()],
        };
        let a = arr(json!([{"id": 1, "sku": "A"}, {"id": 2, "sku": "B"}]));
        let b = arr(json!([{"id": 1, "sku": "A"}]));
        assert_eq!(
            find_common_keys(&a, &b, &options),
            Some(vec!["sku".to_string()])
        );
    }

    #[test]
    fn composite_segment_rendering() {
        let obj = json!({"domain": "learning", "policyName": "read", "n": 7});
        let map = obj.as_object().unwrap();
        assert_eq!(
            key_match_segment(map, &["domain", "policyName"]),
            "domain=learning,policyName=read"
        );
        assert_eq!(key_match_segment(map, &["n"]), "n=7");
    }
}
