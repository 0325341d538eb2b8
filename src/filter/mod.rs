use crate::models::Sentence;

/// Initial and incremental size of the visible window.
pub(crate) const PAGE_SIZE: usize = 20;

/// Distance from the page bottom (logical px) that triggers loading more.
pub(crate) const LOAD_MORE_THRESHOLD_PX: f64 = 800.0;

/// Stable-order subsequence of sentences whose text or any category name
/// contains the trimmed, lower-cased query. An empty or whitespace-only
/// query returns the input unchanged.
///
/// Full re-scan per call; this is a personal collection, not a corpus, so no
/// index is kept.
pub(crate) fn filter_sentences(query: &str, sentences: &[Sentence]) -> Vec<Sentence> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return sentences.to_vec();
    }
    sentences
        .iter()
        .filter(|s| {
            s.text.to_lowercase().contains(&q)
                || s.category_names.iter().any(|n| n.to_lowercase().contains(&q))
        })
        .cloned()
        .collect()
}

/// Advance the display window by one page, clamped to the filtered total.
pub(crate) fn advance_display_count(current: usize, total: usize) -> usize {
    current.saturating_add(PAGE_SIZE).min(total)
}

/// Near-bottom scroll trigger: true when the viewport bottom is within
/// `LOAD_MORE_THRESHOLD_PX` of the document bottom.
pub(crate) fn near_page_bottom(inner_height: f64, scroll_y: f64, scroll_height: f64) -> bool {
    inner_height + scroll_y >= scroll_height - LOAD_MORE_THRESHOLD_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(id: &str, text: &str, category_names: &[&str]) -> Sentence {
        Sentence {
            id: id.to_string(),
            text: text.to_string(),
            category_ids: category_names.iter().map(|n| format!("id-{n}")).collect(),
            category_names: category_names.iter().map(|n| n.to_string()).collect(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_empty_query_returns_input_unchanged() {
        let all = vec![
            sentence("1", "Hello World", &["Truth"]),
            sentence("2", "Second", &[]),
        ];
        assert_eq!(filter_sentences("", &all), all);
        assert_eq!(filter_sentences("   ", &all), all);
    }

    #[test]
    fn test_filter_matches_text_case_insensitively() {
        let all = vec![
            sentence("1", "Hello World", &[]),
            sentence("2", "Goodbye", &[]),
        ];
        let hits = filter_sentences("world", &all);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn test_filter_matches_category_names() {
        let all = vec![
            sentence("1", "Something", &["Truth"]),
            sentence("2", "Other", &["Peace"]),
        ];
        let hits = filter_sentences("tru", &all);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let all = vec![
            sentence("1", "abc", &[]),
            sentence("2", "xabcx", &[]),
            sentence("3", "no match", &[]),
            sentence("4", "ABC", &[]),
        ];
        let ids: Vec<String> = filter_sentences("abc", &all)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
    }

    #[test]
    fn test_advance_clamps_to_total() {
        // 45 filtered results: 20 -> 40 -> 45, never beyond.
        let total = 45;
        let mut count = PAGE_SIZE;
        count = advance_display_count(count, total);
        assert_eq!(count, 40);
        count = advance_display_count(count, total);
        assert_eq!(count, 45);
        count = advance_display_count(count, total);
        assert_eq!(count, 45);
    }

    #[test]
    fn test_display_count_never_exceeds_total_after_any_advances() {
        for total in [0usize, 1, 5, 19, 20, 21, 100] {
            let mut count = PAGE_SIZE;
            for _ in 0..10 {
                count = advance_display_count(count, total);
                assert!(count <= total);
            }
        }
    }

    #[test]
    fn test_near_page_bottom_threshold() {
        // 2000px document, 600px viewport: trigger fires once the bottom is
        // within 800px, i.e. scroll_y >= 600.
        assert!(!near_page_bottom(600.0, 599.0, 2000.0));
        assert!(near_page_bottom(600.0, 600.0, 2000.0));
        assert!(near_page_bottom(600.0, 1400.0, 2000.0));
    }

    #[test]
    fn test_short_page_triggers_immediately() {
        // Content shorter than the viewport: always near the bottom.
        assert!(near_page_bottom(800.0, 0.0, 500.0));
    }
}
