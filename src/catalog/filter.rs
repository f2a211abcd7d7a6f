// Filtering, truncation and cost aggregation behind the Bronze calculator list.

use serde::Serialize;

use super::entry::{RewardEntry, RewardType};

/// Maximum number of entries shown for one query.
pub const MAX_RESULTS: usize = 60;

/// Default page size for paginating the displayed list.
pub const DEFAULT_PER_PAGE: usize = 12;

/// Which reward types a query keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(RewardType),
}

impl TypeFilter {
    /// Parse `"all"` or a reward type tag.
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Some(TypeFilter::All)
        } else {
            RewardType::from_str_name(s).map(TypeFilter::Only)
        }
    }

    pub fn matches(self, entry: &RewardEntry) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => entry.reward_type == t,
        }
    }
}

/// Filter inputs for one catalog query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub type_filter: TypeFilter,
    pub search: String,
    pub bronze_only: bool,
}

/// Result of [`filter_and_aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOutcome<'a> {
    /// Every surviving entry, in source order.
    pub matched: Vec<&'a RewardEntry>,
    /// The first [`MAX_RESULTS`] of `matched`.
    pub displayed: Vec<&'a RewardEntry>,
    pub total_matched: usize,
    pub truncated: bool,
    /// Sum of costs over `displayed` only.
    pub displayed_cost_sum: f64,
}

/// Apply the type, text and purchasable filters, then truncate and total.
///
/// Source order is kept; nothing is re-sorted. With `bronze_only` the base
/// collection is the subset of entries carrying a cost.
pub fn filter_and_aggregate<'a>(
    entries: &'a [RewardEntry],
    query: &CatalogQuery,
) -> FilterOutcome<'a> {
    let term = query.search.trim().to_lowercase();

    let matched: Vec<&RewardEntry> = entries
        .iter()
        .filter(|e| !query.bronze_only || e.is_bronze())
        .filter(|e| query.type_filter.matches(e))
        .filter(|e| term.is_empty() || e.search_haystack().contains(&term))
        .collect();

    let displayed: Vec<&RewardEntry> = matched.iter().take(MAX_RESULTS).copied().collect();
    let displayed_cost_sum: f64 = displayed.iter().map(|e| e.cost_amount()).sum();

    FilterOutcome {
        total_matched: matched.len(),
        truncated: matched.len() > MAX_RESULTS,
        matched,
        displayed,
        displayed_cost_sum,
    }
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `items` into 1-based pages.
///
/// `per_page` is clamped into `[1, MAX_RESULTS]`; `page` into
/// `[1, total_pages]`. An empty list still reports one (empty) page.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.clamp(1, MAX_RESULTS);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::fixtures::entry;

    fn ids(entries: &[&RewardEntry]) -> Vec<String> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    fn sample() -> Vec<RewardEntry> {
        let mut mount = entry("m1", "Felscorched Reins", RewardType::Mount, Some(20000.0));
        mount.source = Some("Fel Gear Vendor".into());
        let mut toy = entry("t1", "Legion Pocket Portal", RewardType::Toy, None);
        toy.achievement = Some("Timerunner's Triumph".into());
        let pet = entry("p1", "Ghostly Whelp", RewardType::Pet, Some(500.0));
        let mut ensemble = entry("e1", "Ensemble: Fel Plate", RewardType::Ensemble, Some(4000.0));
        ensemble.metadata.insert("Armor".into(), "Plate".into());
        vec![mount, toy, pet, ensemble]
    }

    #[test]
    fn test_all_no_search_matches_everything() {
        let entries = sample();
        let outcome = filter_and_aggregate(&entries, &CatalogQuery::default());
        assert_eq!(outcome.matched.len(), entries.len());
        assert_eq!(outcome.total_matched, entries.len());
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_bronze_only_requires_cost() {
        let entries = sample();
        let query = CatalogQuery {
            bronze_only: true,
            ..Default::default()
        };
        let outcome = filter_and_aggregate(&entries, &query);
        assert_eq!(ids(&outcome.matched), ["m1", "p1", "e1"]);
        assert!(outcome.matched.iter().all(|e| e.cost.is_some()));
    }

    #[test]
    fn test_type_filter() {
        let entries = sample();
        let query = CatalogQuery {
            type_filter: TypeFilter::Only(RewardType::Pet),
            ..Default::default()
        };
        let outcome = filter_and_aggregate(&entries, &query);
        assert_eq!(ids(&outcome.matched), ["p1"]);
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let entries = sample();
        let query = CatalogQuery {
            search: "  FEL ".into(),
            ..Default::default()
        };
        let outcome = filter_and_aggregate(&entries, &query);
        assert_eq!(ids(&outcome.matched), ["m1", "e1"]);
    }

    #[test]
    fn test_search_covers_achievement_and_metadata() {
        let entries = sample();
        let by_achievement = CatalogQuery {
            search: "triumph".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_aggregate(&entries, &by_achievement).matched), ["t1"]);

        let by_metadata = CatalogQuery {
            search: "plate".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_aggregate(&entries, &by_metadata).matched), ["e1"]);
    }

    #[test]
    fn test_unmatched_search_is_empty() {
        let entries = sample();
        let query = CatalogQuery {
            search: "no such reward".into(),
            ..Default::default()
        };
        let outcome = filter_and_aggregate(&entries, &query);
        assert!(outcome.matched.is_empty());
        assert!(outcome.displayed.is_empty());
        assert_eq!(outcome.total_matched, 0);
        assert_eq!(outcome.displayed_cost_sum, 0.0);
    }

    #[test]
    fn test_cost_sum() {
        let entries = vec![
            entry("a", "First", RewardType::Toy, Some(100.0)),
            entry("b", "Second", RewardType::Toy, Some(200.0)),
        ];
        let outcome = filter_and_aggregate(&entries, &CatalogQuery::default());
        assert_eq!(outcome.displayed_cost_sum, 300.0);
    }

    #[test]
    fn test_missing_cost_counts_as_zero() {
        let entries = sample();
        let outcome = filter_and_aggregate(&entries, &CatalogQuery::default());
        assert_eq!(outcome.displayed_cost_sum, 24500.0);
    }

    #[test]
    fn test_truncation_and_sum_over_displayed_only() {
        let entries: Vec<RewardEntry> = (0..75)
            .map(|i| entry(&format!("r{i}"), &format!("Reward {i}"), RewardType::Toy, Some(10.0)))
            .collect();
        let outcome = filter_and_aggregate(&entries, &CatalogQuery::default());
        assert!(outcome.truncated);
        assert_eq!(outcome.total_matched, 75);
        assert_eq!(outcome.matched.len(), 75);
        assert_eq!(outcome.displayed.len(), MAX_RESULTS);
        assert_eq!(outcome.displayed_cost_sum, 600.0);
        assert_eq!(outcome.displayed[0].id, "r0");
        assert_eq!(outcome.displayed[59].id, "r59");
    }

    #[test]
    fn test_exactly_max_results_not_truncated() {
        let entries: Vec<RewardEntry> = (0..MAX_RESULTS)
            .map(|i| entry(&format!("r{i}"), "Reward", RewardType::Toy, None))
            .collect();
        let outcome = filter_and_aggregate(&entries, &CatalogQuery::default());
        assert!(!outcome.truncated);
        assert_eq!(outcome.displayed.len(), MAX_RESULTS);
    }

    #[test]
    fn test_order_preserved() {
        let entries = vec![
            entry("z", "Zeta", RewardType::Toy, Some(900.0)),
            entry("a", "Alpha", RewardType::Toy, Some(5.0)),
            entry("m", "Mu", RewardType::Toy, Some(50.0)),
        ];
        let outcome = filter_and_aggregate(&entries, &CatalogQuery::default());
        assert_eq!(ids(&outcome.matched), ["z", "a", "m"]);
    }

    #[test]
    fn test_type_filter_parse() {
        assert_eq!(TypeFilter::parse("all"), Some(TypeFilter::All));
        assert_eq!(TypeFilter::parse("ALL"), Some(TypeFilter::All));
        assert_eq!(
            TypeFilter::parse("mount"),
            Some(TypeFilter::Only(RewardType::Mount))
        );
        assert_eq!(TypeFilter::parse("nope"), None);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 2, 10);
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);

        let last = paginate(&items, 3, 10);
        assert_eq!(last.items, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_paginate_clamps() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, 99, 2);
        assert_eq!(page.page, 3);
        assert_eq!(page.items, vec![5]);

        let page = paginate(&items, 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.items, vec![1]);

        let empty: Vec<u32> = Vec::new();
        let page = paginate(&empty, 1, 10);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }
}
