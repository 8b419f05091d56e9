//! Recursive differencing engine and the three array reconciliation
//! strategies.
//!
//! The engine walks the key union of both trees, consults the selection at
//! every step (`should_traverse` to descend, `is_selected` to report) and
//! hands every array pairing to [`Comparison::compare_arrays`], which picks
//! one of three plans: key-based matching by element identity, positional
//! pairing by index, or set membership on serialized form.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::keys::{self, ArrayKeySetting, ArrayKeySettings, DiffOptions};
use crate::path::{join_key, strip_brackets};
use crate::selection::Selection;
use crate::stable;

/// Kind of a reported difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DifferenceKind {
    Added,
    Removed,
    Changed,
}

/// One reported difference, immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Difference {
    /// Present only in the second document.
    Added { path: String, value_b: Value },
    /// Present only in the first document.
    Removed { path: String, value_a: Value },
    /// Present in both with different values or types.
    Changed {
        path: String,
        value_a: Value,
        value_b: Value,
    },
}

impl Difference {
    pub fn path(&self) -> &str {
        match self {
            Self::Added { path, .. } | Self::Removed { path, .. } | Self::Changed { path, .. } => {
                path
            }
        }
    }

    pub fn kind(&self) -> DifferenceKind {
        match self {
            Self::Added { .. } => DifferenceKind::Added,
            Self::Removed { .. } => DifferenceKind::Removed,
            Self::Changed { .. } => DifferenceKind::Changed,
        }
    }
}

/// Dynamic-typing view of a node: null, objects, and arrays all share one
/// type, so null-vs-object and object-vs-array pairs are not a type change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeType {
    Object,
    String,
    Number,
    Bool,
}

fn node_type(value: &Value) -> NodeType {
    match value {
        Value::Null | Value::Object(_) | Value::Array(_) => NodeType::Object,
        Value::String(_) => NodeType::String,
        Value::Number(_) => NodeType::Number,
        Value::Bool(_) => NodeType::Bool,
    }
}

// Keys an object-typed node contributes to the key union. Arrays expose
// their indices as string keys; null and primitives expose nothing.
fn node_keys(value: &Value) -> Vec<String> {
    match value {
        Value::Object(obj) => obj.keys().cloned().collect(),
        Value::Array(arr) => (0..arr.len()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    }
}

// Member lookup matching `node_keys`: objects by key, arrays by parsed index.
fn node_member<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    match value {
        Value::Object(obj) => obj.get(key),
        Value::Array(arr) => key.parse::<usize>().ok().and_then(|i| arr.get(i)),
        _ => None,
    }
}

/// One comparison run: the engine plus the snapshots it consults.
///
/// Selection, per-array settings, and heuristic options are borrowed
/// read-only for the duration of the run; the engine never mutates them.
pub struct Comparison<'a> {
    selection: &'a Selection,
    settings: &'a ArrayKeySettings,
    options: &'a DiffOptions,
}

impl<'a> Comparison<'a> {
    pub fn new(
        selection: &'a Selection,
        settings: &'a ArrayKeySettings,
        options: &'a DiffOptions,
    ) -> Self {
        Self {
            selection,
            settings,
            options,
        }
    }

    /// Compare two trees from the root.
    pub fn diff(&self, a: &Value, b: &Value) -> Vec<Difference> {
        self.diff_at(a, b, "")
    }

    /// Compare two nodes addressed by `path`.
    ///
    /// Differences come out in key-union order, nested results inline at the
    /// position of their parent key.
    pub fn diff_at(&self, a: &Value, b: &Value, path: &str) -> Vec<Difference> {
        if let (Value::Array(arr_a), Value::Array(arr_b)) = (a, b) {
            return self.compare_arrays(arr_a, arr_b, path);
        }

        let mut differences = Vec::new();
        let mut all_keys: IndexSet<String> = node_keys(a).into_iter().collect();
        all_keys.extend(node_keys(b));

        for key in &all_keys {
            let current = join_key(path, key);
            if !self.selection.should_traverse(&current) {
                continue;
            }
            let report = self.selection.is_selected(&current);

            match (node_member(a, key), node_member(b, key)) {
                (None, Some(value_b)) => {
                    if report {
                        differences.push(Difference::Added {
                            path: current,
                            value_b: value_b.clone(),
                        });
                    }
                }
                (Some(value_a), None) => {
                    if report {
                        differences.push(Difference::Removed {
                            path: current,
                            value_a: value_a.clone(),
                        });
                    }
                }
                (Some(value_a), Some(value_b)) => {
                    if node_type(value_a) != node_type(value_b) {
                        if report {
                            differences.push(Difference::Changed {
                                path: current,
                                value_a: value_a.clone(),
                                value_b: value_b.clone(),
                            });
                        }
                    } else if let (Value::Array(arr_a), Value::Array(arr_b)) = (value_a, value_b) {
                        differences.extend(self.compare_arrays(arr_a, arr_b, &current));
                    } else if node_type(value_a) == NodeType::Object
                        && !value_a.is_null()
                        && !value_b.is_null()
                    {
                        differences.extend(self.diff_at(value_a, value_b, &current));
                    } else if value_a != value_b && report {
                        differences.push(Difference::Changed {
                            path: current,
                            value_a: value_a.clone(),
                            value_b: value_b.clone(),
                        });
                    }
                }
                (None, None) => {}
            }
        }
        differences
    }

    /// Array reconciliation. Key-based and positional plans apply to arrays
    /// with object elements and a selected descendant; everything else falls
    /// through to set membership.
    pub fn compare_arrays(&self, arr_a: &[Value], arr_b: &[Value], path: &str) -> Vec<Difference> {
        let mut differences = Vec::new();
        if !self.selection.should_traverse(path) {
            return differences;
        }

        let has_objects =
            arr_a.iter().any(Value::is_object) || arr_b.iter().any(Value::is_object);

        if has_objects && self.selection.has_selected_descendant(path) {
            let common_keys = match self.settings.get(&strip_brackets(path)) {
                ArrayKeySetting::Positional => None,
                ArrayKeySetting::Manual(keys) => Some(keys.clone()),
                ArrayKeySetting::Auto => keys::find_common_keys(arr_a, arr_b, self.options),
            };

            if let Some(common_keys) = common_keys.filter(|keys| !keys.is_empty()) {
                self.compare_keyed(arr_a, arr_b, path, &common_keys, &mut differences);
            } else {
                self.compare_positional(arr_a, arr_b, path, &mut differences);
            }
            return differences;
        }

        // Set membership on stable serialized form; order and duplicate
        // counts do not matter.
        if !self.selection.is_selected(path) {
            return differences;
        }
        let set_a: HashSet<String> = arr_a.iter().map(stable::stringify).collect();
        let set_b: HashSet<String> = arr_b.iter().map(stable::stringify).collect();
        for (index, item) in arr_a.iter().enumerate() {
            if !set_b.contains(&stable::stringify(item)) {
                differences.push(Difference::Removed {
                    path: format!("{path}[{index}]"),
                    value_a: item.clone(),
                });
            }
        }
        for (index, item) in arr_b.iter().enumerate() {
            if !set_a.contains(&stable::stringify(item)) {
                differences.push(Difference::Added {
                    path: format!("{path}[{index}]"),
                    value_b: item.clone(),
                });
            }
        }
        differences
    }

    // Match object elements by composite identity. Elements missing one of
    // the keys never enter the maps and are invisible to this plan; a later
    // duplicate of the same composite overwrites the earlier one.
    fn compare_keyed(
        &self,
        arr_a: &[Value],
        arr_b: &[Value],
        path: &str,
        common_keys: &[String],
        differences: &mut Vec<Difference>,
    ) {
        let map_a = index_by_composite(arr_a, common_keys);
        let map_b = index_by_composite(arr_b, common_keys);

        let mut all_composites: IndexSet<&String> = map_a.keys().collect();
        all_composites.extend(map_b.keys());

        let segment = |item: &Value| {
            // Entries come from as_object above.
            item.as_object()
                .map(|obj| keys::key_match_segment(obj, common_keys))
                .unwrap_or_default()
        };

        for composite in all_composites {
            match (map_a.get(composite), map_b.get(composite)) {
                (None, Some(item_b)) => {
                    if self.selection.is_selected(path) {
                        differences.push(Difference::Added {
                            path: format!("{path}[{}]", segment(item_b)),
                            value_b: (*item_b).clone(),
                        });
                    }
                }
                (Some(item_a), None) => {
                    if self.selection.is_selected(path) {
                        differences.push(Difference::Removed {
                            path: format!("{path}[{}]", segment(item_a)),
                            value_a: (*item_a).clone(),
                        });
                    }
                }
                (Some(item_a), Some(item_b)) => {
                    let item_path = format!("{path}[{}]", segment(item_a));
                    differences.extend(self.diff_at(item_a, item_b, &item_path));
                }
                (None, None) => {}
            }
        }
    }

    // Pair by index up to the longer side. Object-typed pairs recurse;
    // primitive pairs report on inequality at their indexed path.
    fn compare_positional(
        &self,
        arr_a: &[Value],
        arr_b: &[Value],
        path: &str,
        differences: &mut Vec<Difference>,
    ) {
        let max_len = arr_a.len().max(arr_b.len());
        for i in 0..max_len {
            let item_path = format!("{path}[{i}]");
            match (arr_a.get(i), arr_b.get(i)) {
                (None, Some(item_b)) => {
                    if self.selection.is_selected(path) {
                        differences.push(Difference::Added {
                            path: item_path,
                            value_b: item_b.clone(),
                        });
                    }
                }
                (Some(item_a), None) => {
                    if self.selection.is_selected(path) {
                        differences.push(Difference::Removed {
                            path: item_path,
                            value_a: item_a.clone(),
                        });
                    }
                }
                (Some(item_a), Some(item_b)) => {
                    if node_type(item_a) == NodeType::Object
                        && node_type(item_b) == NodeType::Object
                    {
                        differences.extend(self.diff_at(item_a, item_b, &item_path));
                    } else if item_a != item_b && self.selection.is_selected(&item_path) {
                        differences.push(Difference::Changed {
                            path: item_path,
                            value_a: item_a.clone(),
                            value_b: item_b.clone(),
                        });
                    }
                }
                (None, None) => {}
            }
        }
    }
}

// Object elements with every key present, keyed by composite identity.
// Later duplicates of a composite overwrite earlier ones.
fn index_by_composite<'v>(
    arr: &'v [Value],
    common_keys: &[String],
) -> IndexMap<String, &'v Value> {
    let mut map: IndexMap<String, &Value> = IndexMap::new();
    for item in arr {
        if let Some(obj) = item.as_object() {
            if common_keys.iter().all(|k| obj.contains_key(k)) {
                map.insert(keys::composite_key(obj, common_keys), item);
            }
        }
    }
    map
}

/// Compare two trees with universal selection, automatic key discovery, and
/// default options.
pub fn diff(a: &Value, b: &Value) -> Vec<Difference> {
    let selection = Selection::All;
    let settings = ArrayKeySettings::new();
    let options = DiffOptions::default();
    Comparison::new(&selection, &settings, &options).diff(a, b)
}
