//! End-to-end comparison scenarios over the public API.

use json_compare_core::{
    diff, ArrayKeySetting, ArrayKeySettings, Comparison, DiffOptions, Difference, Selection,
};
use serde_json::json;

#[test]
fn added_top_level_property() {
    let a = json!({"a": 1});
    let b = json!({"a": 1, "b": 2});
    assert_eq!(
        diff(&a, &b),
        vec![Difference::Added {
            path: "b".into(),
            value_b: json!(2),
        }]
    );
}

#[test]
fn auto_keyed_array_change() {
    let a = json!({"list": [{"id": 1, "x": "a"}]});
    let b = json!({"list": [{"id": 1, "x": "b"}]});
    assert_eq!(
        diff(&a, &b),
        vec![Difference::Changed {
            path: "list[id=1].x".into(),
            value_a: json!("a"),
            value_b: json!("b"),
        }]
    );
}

#[test]
fn primitive_array_set_semantics() {
    let a = json!({"arr": [1, 2, 3]});
    let b = json!({"arr": [2, 3, 4]});
    let differences = diff(&a, &b);
    assert_eq!(differences.len(), 2);
    assert!(differences.contains(&Difference::Removed {
        path: "arr[0]".into(),
        value_a: json!(1),
    }));
    assert!(differences.contains(&Difference::Added {
        path: "arr[2]".into(),
        value_b: json!(4),
    }));
}

#[test]
fn unselected_sibling_stays_silent() {
    let selection = Selection::from_paths(["user.email"]);
    let settings = ArrayKeySettings::new();
    let options = DiffOptions::default();
    let cmp = Comparison::new(&selection, &settings, &options);

    let a = json!({"user": {"name": "x", "email": "a@x"}});
    let b = json!({"user": {"name": "y", "email": "a@x"}});
    assert_eq!(cmp.diff(&a, &b), vec![]);
}

#[test]
fn deep_mixed_document() {
    let a = json!({
        "title": "report",
        "meta": {"version": 1, "tags": ["draft", "internal"]},
        "sections": [
            {"name": "intro", "words": 100},
            {"name": "body", "words": 900}
        ]
    });
    let b = json!({
        "title": "report",
        "meta": {"version": 2, "tags": ["internal", "final"]},
        "sections": [
            {"name": "body", "words": 950},
            {"name": "outro", "words": 50}
        ]
    });

    let differences = diff(&a, &b);
    let summary: Vec<&str> = differences.iter().map(Difference::path).collect();
    assert_eq!(
        summary,
        vec![
            "meta.version",
            "meta.tags[0]",
            "meta.tags[1]",
            "sections[name=intro]",
            "sections[name=body].words",
            "sections[name=outro]",
        ]
    );
}

#[test]
fn manual_and_positional_settings_per_array() {
    let selection = Selection::All;
    let mut settings = ArrayKeySettings::new();
    settings.set("a", ArrayKeySetting::Positional);
    settings.set("b", ArrayKeySetting::Manual(vec!["code".to_string()]));
    let options = DiffOptions::default();
    let cmp = Comparison::new(&selection, &settings, &options);

    let a = json!({
        "a": [{"id": 1}, {"id": 2}],
        "b": [{"id": 1, "code": "x", "v": 1}]
    });
    let b = json!({
        "a": [{"id": 2}, {"id": 1}],
        "b": [{"id": 9, "code": "x", "v": 1}]
    });

    let differences = cmp.diff(&a, &b);
    let summary: Vec<&str> = differences.iter().map(Difference::path).collect();
    assert_eq!(summary, vec!["a[0].id", "a[1].id", "b[code=x].id"]);
}

#[test]
fn selection_declared_once_per_array() {
    // One bracket-free selection path covers every element of the nested
    // arrays it crosses; qty differences stay unselected throughout.
    let selection = Selection::from_paths(["orders.items", "orders.items.sku"]);
    let settings = ArrayKeySettings::new();
    let options = DiffOptions::default();
    let cmp = Comparison::new(&selection, &settings, &options);

    let a = json!({"orders": [
        {"id": 1, "items": [{"sku": "A1", "qty": 2}]},
        {"id": 2, "items": [{"sku": "B1", "qty": 1}]}
    ]});
    let b = json!({"orders": [
        {"id": 1, "items": [{"sku": "A2", "qty": 2}]},
        {"id": 2, "items": [{"sku": "B1", "qty": 5}]}
    ]});

    let differences = cmp.diff(&a, &b);
    let summary: Vec<&str> = differences.iter().map(Difference::path).collect();
    assert_eq!(
        summary,
        vec!["orders[id=1].items[sku=A1]", "orders[id=1].items[sku=A2]"]
    );
    assert!(matches!(differences[0], Difference::Removed { .. }));
    assert!(matches!(differences[1], Difference::Added { .. }));
}
