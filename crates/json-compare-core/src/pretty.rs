//! The 2-space pretty serializer the Position Locator is coupled to.
//!
//! `locate` navigates raw text by structural characters and must see exactly
//! this formatting convention. Changing the indentation or layout here is a
//! breaking change for the locator and has to happen in lockstep with it.

use serde_json::Value;

/// Render `val` with 2-space indentation, keys in document order.
pub fn to_pretty_string(val: &Value) -> String {
    serde_json::to_string_pretty(val).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn two_space_indentation() {
        let text = to_pretty_string(&json!({"a": {"b": 1}}));
        assert_eq!(text, "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
    }

    #[test]
    fn empty_containers_stay_inline() {
        assert_eq!(to_pretty_string(&json!({})), "{}");
        assert_eq!(to_pretty_string(&json!([])), "[]");
    }

    #[test]
    fn array_elements_one_per_line() {
        let text = to_pretty_string(&json!([1, 2]));
        assert_eq!(text, "[\n  1,\n  2\n]");
    }
}
