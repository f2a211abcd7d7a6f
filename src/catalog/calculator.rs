// Bronze calculator: totals for a user's selected rewards.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use super::entry::{Cost, RewardEntry};
use super::RewardCatalog;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionTally<'a> {
    /// Selected entries in request order, duplicates dropped.
    pub items: Vec<&'a RewardEntry>,
    /// Bronze total. Other currencies are only summed in `by_currency`.
    pub total_cost: f64,
    /// Cost totals per currency, in first-seen order.
    pub by_currency: IndexMap<String, f64>,
    /// Selected entries that have no cost.
    pub unpriced_count: usize,
    pub unknown_ids: Vec<String>,
}

/// Total the cost of the selected entry ids.
pub fn tally_selection<'a, I, S>(catalog: &'a RewardCatalog, ids: I) -> SelectionTally<'a>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut tally = SelectionTally {
        items: Vec::new(),
        total_cost: 0.0,
        by_currency: IndexMap::new(),
        unpriced_count: 0,
        unknown_ids: Vec::new(),
    };

    for id in ids {
        let id = id.as_ref();
        if !seen.insert(id.to_string()) {
            continue;
        }
        let Some(entry) = catalog.get(id) else {
            tally.unknown_ids.push(id.to_string());
            continue;
        };
        match &entry.cost {
            Some(cost) => {
                let currency = cost.currency_or_default();
                if currency == Cost::DEFAULT_CURRENCY {
                    tally.total_cost += cost.amount;
                }
                *tally.by_currency.entry(currency.to_string()).or_insert(0.0) += cost.amount;
            }
            None => tally.unpriced_count += 1,
        }
        tally.items.push(entry);
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::fixtures::entry;
    use crate::catalog::entry::{Cost, RewardType};

    fn catalog() -> RewardCatalog {
        let mut marks = entry("c", "Heirloom Token", RewardType::Heirloom, None);
        marks.cost = Some(Cost {
            amount: 3.0,
            currency: Some("Infinite Power".into()),
        });
        RewardCatalog::new(vec![
            entry("a", "Reins", RewardType::Mount, Some(20000.0)),
            entry("b", "Whelp", RewardType::Pet, Some(500.0)),
            marks,
            entry("d", "Title", RewardType::Title, None),
        ])
        .unwrap()
    }

    #[test]
    fn test_tally_sums_selected() {
        let catalog = catalog();
        let tally = tally_selection(&catalog, ["a", "b"]);
        assert_eq!(tally.total_cost, 20500.0);
        assert_eq!(tally.items.len(), 2);
        assert_eq!(tally.by_currency.get("Bronze"), Some(&20500.0));
        assert!(tally.unknown_ids.is_empty());
    }

    #[test]
    fn test_tally_ignores_duplicates_and_reports_unknown() {
        let catalog = catalog();
        let tally = tally_selection(&catalog, ["b", "b", "zzz", "a"]);
        let ids: Vec<_> = tally.items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(tally.unknown_ids, vec!["zzz".to_string()]);
        assert_eq!(tally.total_cost, 20500.0);
    }

    #[test]
    fn test_tally_unpriced_and_currencies() {
        let catalog = catalog();
        let tally = tally_selection(&catalog, ["c", "d", "a"]);
        assert_eq!(tally.unpriced_count, 1);
        let currencies: Vec<_> = tally.by_currency.keys().map(String::as_str).collect();
        assert_eq!(currencies, ["Infinite Power", "Bronze"]);
        assert_eq!(tally.by_currency.get("Infinite Power"), Some(&3.0));
    }

    #[test]
    fn test_total_cost_counts_bronze_only() {
        let catalog = catalog();
        let tally = tally_selection(&catalog, ["c", "a"]);
        assert_eq!(tally.total_cost, 20000.0);
        assert_eq!(tally.by_currency.get("Bronze"), Some(&20000.0));
        assert_eq!(tally.by_currency.get("Infinite Power"), Some(&3.0));
    }

    #[test]
    fn test_empty_selection() {
        let catalog = catalog();
        let tally = tally_selection(&catalog, Vec::<String>::new());
        assert!(tally.items.is_empty());
        assert_eq!(tally.total_cost, 0.0);
    }
}
