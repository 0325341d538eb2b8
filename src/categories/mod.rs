use crate::models::{Category, FlatCategory};

/// Flatten the category forest into a single depth-annotated list by
/// pre-order depth-first traversal: a parent immediately precedes its
/// subtree, siblings keep the forest's given order, and `level` is the depth
/// from a root.
///
/// Pure function of the forest snapshot; cheap enough to recompute whenever
/// the forest signal changes (callers memoize with `Memo`).
pub(crate) fn flatten_tree(forest: &[Category]) -> Vec<FlatCategory> {
    let mut out: Vec<FlatCategory> = Vec::new();
    for root in forest {
        push_subtree(root, 0, &mut out);
    }
    out
}

fn push_subtree(node: &Category, level: usize, out: &mut Vec<FlatCategory>) {
    out.push(FlatCategory {
        id: node.id.clone(),
        name: node.name.clone(),
        level,
    });
    for child in &node.children {
        push_subtree(child, level + 1, out);
    }
}

/// Case-insensitive, whitespace-trimmed substring match over the flattened
/// list. An empty or whitespace-only query matches every category (the
/// dropdown shows the full list on focus).
pub(crate) fn match_categories(query: &str, flat: &[FlatCategory]) -> Vec<FlatCategory> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return flat.to_vec();
    }
    flat.iter()
        .filter(|c| c.name.trim().to_lowercase().contains(&q))
        .cloned()
        .collect()
}

/// Full-string equality match (trimmed, lower-cased). Substring containment
/// is not enough. If the data holds duplicate names, the earliest entry in
/// traversal order wins.
pub(crate) fn find_exact_match(query: &str, flat: &[FlatCategory]) -> Option<FlatCategory> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }
    flat.iter()
        .find(|c| c.name.trim().to_lowercase() == q)
        .cloned()
}

/// Toggle membership of `id` in the selection: remove when present, append
/// to the end when absent. First-selected-first order is preserved.
pub(crate) fn toggle_selection(mut selected: Vec<String>, id: &str) -> Vec<String> {
    let before = selected.len();
    selected.retain(|s| s != id);
    if selected.len() == before {
        selected.push(id.to_string());
    }
    selected
}

/// Idempotent append, used by the exact-match auto-add while typing.
pub(crate) fn add_if_missing(mut selected: Vec<String>, id: &str) -> Vec<String> {
    if !selected.iter().any(|s| s == id) {
        selected.push(id.to_string());
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: &str, name: &str, children: Vec<Category>) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: None,
            children,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_flatten_empty_forest() {
        assert!(flatten_tree(&[]).is_empty());
    }

    #[test]
    fn test_flatten_is_preorder_with_levels() {
        // a ── b ── c
        // │    └─ d
        // e
        let forest = vec![
            cat(
                "a",
                "A",
                vec![cat("b", "B", vec![cat("c", "C", vec![]), cat("d", "D", vec![])])],
            ),
            cat("e", "E", vec![]),
        ];

        let flat = flatten_tree(&forest);
        let ids: Vec<&str> = flat.iter().map(|f| f.id.as_str()).collect();
        let levels: Vec<usize> = flat.iter().map(|f| f.level).collect();

        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(levels, vec![0, 1, 2, 2, 0]);
        // Length equals total node count.
        assert_eq!(flat.len(), 5);
    }

    #[test]
    fn test_flatten_parent_precedes_subtree_and_sibling_order() {
        let forest = vec![
            cat("r1", "First", vec![cat("r1c", "Child", vec![])]),
            cat("r2", "Second", vec![]),
        ];
        let flat = flatten_tree(&forest);
        let pos = |id: &str| flat.iter().position(|f| f.id == id).unwrap();

        assert!(pos("r1") < pos("r1c"));
        assert!(pos("r1c") < pos("r2"));
    }

    #[test]
    fn test_match_is_case_and_whitespace_insensitive() {
        let flat = flatten_tree(&[cat("a", "wisdom", vec![])]);
        let hits = match_categories(" Wisdom ", &flat);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn test_empty_query_matches_everything_in_order() {
        let flat = flatten_tree(&[cat("a", "A", vec![]), cat("b", "B", vec![])]);
        let hits = match_categories("   ", &flat);
        assert_eq!(hits, flat);
    }

    #[test]
    fn test_substring_match_is_not_exact_match() {
        let flat = flatten_tree(&[cat("a", "Wisdom", vec![])]);
        assert_eq!(match_categories("wis", &flat).len(), 1);
        assert!(find_exact_match("wis", &flat).is_none());
    }

    #[test]
    fn test_exact_match_full_equality() {
        let flat = flatten_tree(&[cat("a", "Wisdom", vec![])]);
        let hit = find_exact_match(" wisdom ", &flat).expect("should match");
        assert_eq!(hit.id, "a");
    }

    #[test]
    fn test_exact_match_duplicate_names_resolves_to_earliest() {
        let flat = flatten_tree(&[
            cat("first", "Truth", vec![]),
            cat("second", "truth", vec![]),
        ]);
        let hit = find_exact_match("truth", &flat).expect("should match");
        assert_eq!(hit.id, "first");
    }

    #[test]
    fn test_exact_match_on_empty_query_is_none() {
        let flat = flatten_tree(&[cat("a", "A", vec![])]);
        assert!(find_exact_match("  ", &flat).is_none());
    }

    #[test]
    fn test_toggle_is_idempotent_and_order_preserving() {
        let s = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let toggled = toggle_selection(s.clone(), "b");
        assert_eq!(toggled, vec!["a".to_string(), "c".to_string()]);

        let back = toggle_selection(toggled, "b");
        // `b` re-enters at the end; relative order of the others unchanged.
        assert_eq!(back, vec!["a".to_string(), "c".to_string(), "b".to_string()]);

        let twice = toggle_selection(toggle_selection(s.clone(), "x"), "x");
        assert_eq!(twice, s);
    }

    #[test]
    fn test_add_if_missing_never_duplicates() {
        let s = add_if_missing(vec!["a".to_string()], "a");
        assert_eq!(s, vec!["a".to_string()]);
        let s = add_if_missing(s, "b");
        assert_eq!(s, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_wisdom_peace_end_to_end() {
        // Scenario from the product brief: nested Wisdom/Peace forest.
        let forest = vec![cat("a", "Wisdom", vec![cat("b", "Peace", vec![])])];
        let flat = flatten_tree(&forest);

        assert_eq!(flat.len(), 2);
        assert_eq!((flat[0].id.as_str(), flat[0].level), ("a", 0));
        assert_eq!((flat[1].id.as_str(), flat[1].level), ("b", 1));

        let exact = find_exact_match("peace", &flat).expect("should match");
        assert_eq!(exact.id, "b");
        assert!(find_exact_match("pea", &flat).is_none());
    }
}
