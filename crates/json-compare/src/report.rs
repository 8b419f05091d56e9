//! Plain-text comparison report.
//!
//! A header carries the two document aliases and the difference count,
//! followed by one section per difference kind. Values are rendered
//! compactly in document key order.

use json_compare_core::{Difference, DifferenceKind};

/// Differences grouped by kind, original order preserved within each group.
#[derive(Debug, Default)]
pub struct Classified<'d> {
    pub removed: Vec<&'d Difference>,
    pub added: Vec<&'d Difference>,
    pub changed: Vec<&'d Difference>,
}

pub fn classify(differences: &[Difference]) -> Classified<'_> {
    let mut classified = Classified::default();
    for difference in differences {
        match difference.kind() {
            DifferenceKind::Removed => classified.removed.push(difference),
            DifferenceKind::Added => classified.added.push(difference),
            DifferenceKind::Changed => classified.changed.push(difference),
        }
    }
    classified
}

/// Render the report for a finished comparison.
pub fn render(differences: &[Difference], alias_a: &str, alias_b: &str) -> String {
    let mut lines: Vec<String> = vec![
        "JSON Vergleich - Ergebnisse".to_string(),
        "=".repeat(50),
        format!("Vergleich: {alias_a} \u{21c4} {alias_b}"),
        format!("Anzahl Unterschiede: {}", differences.len()),
        String::new(),
        "\u{2500}".repeat(50),
        String::new(),
    ];

    let classified = classify(differences);

    if !classified.removed.is_empty() {
        lines.push(format!("NUR IN {alias_a} ({}):", classified.removed.len()));
        lines.push("\u{2500}".repeat(30));
        for difference in &classified.removed {
            if let Difference::Removed { path, value_a } = difference {
                lines.push(format!("  - {path}: {}", compact(value_a)));
            }
        }
        lines.push(String::new());
    }

    if !classified.added.is_empty() {
        lines.push(format!("NUR IN {alias_b} ({}):", classified.added.len()));
        lines.push("\u{2500}".repeat(30));
        for difference in &classified.added {
            if let Difference::Added { path, value_b } = difference {
                lines.push(format!("  + {path}: {}", compact(value_b)));
            }
        }
        lines.push(String::new());
    }

    if !classified.changed.is_empty() {
        lines.push(format!("UNTERSCHIEDLICH ({}):", classified.changed.len()));
        lines.push("\u{2500}".repeat(30));
        for difference in &classified.changed {
            if let Difference::Changed {
                path,
                value_a,
                value_b,
            } = difference
            {
                lines.push(format!("  ~ {path}:"));
                lines.push(format!("      {alias_a}: {}", compact(value_a)));
                lines.push(format!("      {alias_b}: {}", compact(value_b)));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn compact(value: &serde_json::Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_compare_core::diff;
    use serde_json::json;

    #[test]
    fn classify_splits_by_kind() {
        let differences = diff(
            &json!({"gone": 1, "edit": "x"}),
            &json!({"edit": "y", "new": 2}),
        );
        let classified = classify(&differences);
        assert_eq!(classified.removed.len(), 1);
        assert_eq!(classified.added.len(), 1);
        assert_eq!(classified.changed.len(), 1);
    }

    #[test]
    fn render_sections_and_counts() {
        let differences = diff(
            &json!({"gone": 1, "edit": "x"}),
            &json!({"edit": "y", "new": 2}),
        );
        let text = render(&differences, "links", "rechts");
        assert!(text.contains("Vergleich: links \u{21c4} rechts"));
        assert!(text.contains("Anzahl Unterschiede: 3"));
        assert!(text.contains("NUR IN links (1):"));
        assert!(text.contains("  - gone: 1"));
        assert!(text.contains("NUR IN rechts (1):"));
        assert!(text.contains("  + new: 2"));
        assert!(text.contains("UNTERSCHIEDLICH (1):"));
        assert!(text.contains("  ~ edit:"));
        assert!(text.contains("      links: \"x\""));
        assert!(text.contains("      rechts: \"y\""));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let differences = diff(&json!({"v": 1}), &json!({"v": 2}));
        let text = render(&differences, "A", "B");
        assert!(!text.contains("NUR IN"));
        assert!(text.contains("UNTERSCHIEDLICH (1):"));
    }
}
