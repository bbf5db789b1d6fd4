//! Label weights and section names.
//!
//! These two tables decide which pull requests reach the release notes and
//! in what order. A category with a weight but no section name (Testing,
//! Internal Cleanup) is recognized when picking a category and then dropped.

/// Prefix stripped from label names before lookup, e.g. `Type: Feature`.
pub const LABEL_PREFIX: &str = "Type: ";

/// Category used when a pull request has no recognized label.
pub const DEFAULT_CATEGORY: &str = "Bug";

const WEIGHTS: &[(&str, i32)] = &[
    ("Dependencies", 70),
    ("API Change", 60),
    ("Behavior Change", 50),
    ("Feature", 40),
    ("Performance", 30),
    ("Bug", 20),
    ("Documentation", 10),
    ("Testing", 0),
    ("Internal Cleanup", 0),
];

const SECTION_NAMES: &[(&str, &str)] = &[
    ("Dependencies", "Dependencies"),
    ("API Change", "API Changes"),
    ("Behavior Change", "Behavior Changes"),
    ("Feature", "New Features"),
    ("Performance", "Performance Improvements"),
    ("Bug", "Bug Fixes"),
    ("Documentation", "Documentation"),
];

/// Weight of a category, `None` when it is not in the table.
pub fn weight(category: &str) -> Option<i32> {
    WEIGHTS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, weight)| *weight)
}

/// Section heading for a category, `None` when it is excluded from notes.
pub fn section_name(category: &str) -> Option<&'static str> {
    SECTION_NAMES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, section)| *section)
}

/// Weight used for ordering; unknown labels sort with the lowest weight.
pub fn sort_weight(category: &str) -> i32 {
    weight(category).unwrap_or_default()
}

/// Picks the highest weighted label after stripping [`LABEL_PREFIX`]. Ties
/// keep the original label order. No labels, or a winner that is not in the
/// weight table, yields [`DEFAULT_CATEGORY`].
pub fn pick_category<S: AsRef<str>>(labels: &[S]) -> String {
    let mut names = labels
        .iter()
        .map(|l| {
            let label = l.as_ref();
            label.strip_prefix(LABEL_PREFIX).unwrap_or(label)
        })
        .collect::<Vec<&str>>();

    // sort_by_key is stable
    names.sort_by_key(|name| std::cmp::Reverse(sort_weight(name)));

    match names.first() {
        Some(name) if weight(name).is_some() => name.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_labels_use_default_category() {
        let labels: Vec<String> = vec![];
        assert_eq!(pick_category(&labels), DEFAULT_CATEGORY);
    }

    #[test]
    fn unrecognized_labels_use_default_category() {
        assert_eq!(pick_category(&["P1", "Status: Blocked"]), "Bug");
    }

    #[test]
    fn highest_weight_wins_after_prefix_strip() {
        let labels = ["Type: Documentation", "Type: Feature", "Type: Bug"];
        assert_eq!(pick_category(&labels), "Feature");

        assert_eq!(pick_category(&["Type: API Change", "Dependencies"]), "Dependencies");
    }

    #[test]
    fn ties_keep_original_order() {
        assert_eq!(
            pick_category(&["Type: Internal Cleanup", "Type: Testing"]),
            "Internal Cleanup"
        );
        assert_eq!(
            pick_category(&["Type: Testing", "Type: Internal Cleanup"]),
            "Testing"
        );
    }

    #[test]
    fn zero_weight_unknown_label_ahead_of_known_zero_weight_falls_back() {
        // an unknown label sorts like a zero weight one and keeps its place
        assert_eq!(pick_category(&["needs-triage", "Type: Testing"]), "Bug");
    }

    #[test]
    fn pick_category_is_deterministic() {
        let labels = ["Type: Performance", "Type: Bug", "Type: Behavior Change"];
        let first = pick_category(&labels);
        for _ in 0..10 {
            assert_eq!(pick_category(&labels), first);
        }
        assert_eq!(first, "Behavior Change");
    }

    #[test]
    fn categories_without_section_are_excluded() {
        assert_eq!(section_name("Feature"), Some("New Features"));
        assert_eq!(section_name("Testing"), None);
        assert_eq!(section_name("Internal Cleanup"), None);
        assert_eq!(weight("Internal Cleanup"), Some(0));
        assert_eq!(weight("Unknown"), None);
    }
}
