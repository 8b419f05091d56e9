//! Deterministic JSON serialization with sorted object keys.
//!
//! The set-based array strategy tests element membership by serialized form;
//! sorting keys makes that test independent of the key insertion order of
//! either input document.

use serde_json::Value;

/// Serialize `val` to a compact, deterministic JSON string.
///
/// Object keys are sorted lexicographically at every level. All other values
/// follow standard JSON serialization rules.
pub fn stringify(val: &Value) -> String {
    match val {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => escape(s),
        Value::Array(arr) => {
            if arr.is_empty() {
                return "[]".to_owned();
            }
            let mut out = String::from('[');
            let last = arr.len() - 1;
            for (i, item) in arr.iter().enumerate() {
                out.push_str(&stringify(item));
                if i < last {
                    out.push(',');
                }
            }
            out.push(']');
            out
        }
        Value::Object(obj) => {
            if obj.is_empty() {
                return "{}".to_owned();
            }
            let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
            keys.sort_unstable();
            let mut out = String::from('{');
            let last = keys.len() - 1;
            for (i, key) in keys.iter().enumerate() {
                out.push_str(&escape(key));
                out.push(':');
                out.push_str(&stringify(&obj[*key]));
                if i < last {
                    out.push(',');
                }
            }
            out.push('}');
            out
        }
    }
}

// Quoted JSON string literal for `s`.
fn escape(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_default()
}
