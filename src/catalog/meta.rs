// Label/value projection of a single reward entry for detail cards.

use serde::Serialize;

use super::entry::RewardEntry;

/// How many extra metadata pairs follow the fixed fields.
pub const MAX_EXTRA_METADATA: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaItem {
    pub label: String,
    pub value: String,
}

impl MetaItem {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Ordered label/value pairs describing `entry`.
///
/// Achievement, requirement, source and phase come first, each only when
/// non-empty. Up to [`MAX_EXTRA_METADATA`] metadata columns follow, skipping
/// columns that back a canonical field and values equal to the entry name.
pub fn entry_meta(entry: &RewardEntry) -> Vec<MetaItem> {
    let fixed = [
        ("Achievement", entry.achievement.as_deref()),
        ("Requirement", entry.requirement.as_deref()),
        ("Source", entry.source.as_deref()),
        ("Phase", entry.phase()),
    ];
    let mut items: Vec<MetaItem> = fixed
        .into_iter()
        .filter_map(|(label, value)| value.filter(|v| !v.trim().is_empty()).map(|v| (label, v)))
        .map(|(label, value)| MetaItem::new(label, value))
        .collect();

    let canonical: Vec<&str> = [
        Some(entry.name_field.as_str()),
        entry.cost_field.as_deref(),
        entry.phase_field.as_deref(),
        entry.source_field.as_deref(),
        entry.requirement_field.as_deref(),
        entry.achievement_field.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    let extras = entry
        .metadata
        .iter()
        .filter(|(key, value)| {
            !canonical.contains(&key.as_str())
                && !value.trim().is_empty()
                && value.as_str() != entry.name
        })
        .take(MAX_EXTRA_METADATA)
        .map(|(key, value)| MetaItem::new(key, value));
    items.extend(extras);

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::fixtures::entry;
    use crate::catalog::entry::RewardType;

    fn labels(items: &[MetaItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn test_fixed_fields_in_priority_order() {
        let mut e = entry("a", "Reins", RewardType::Mount, Some(100.0));
        e.source = Some("Vendor".into());
        e.requirement = Some("Phase 2 unlock".into());
        e.achievement = Some("Timerunner's Triumph".into());
        e.phase_field = Some("Phase".into());
        e.metadata.insert("Phase".into(), "Phase 3".into());

        let items = entry_meta(&e);
        assert_eq!(labels(&items), ["Achievement", "Requirement", "Source", "Phase"]);
        assert_eq!(items[3].value, "Phase 3");
    }

    #[test]
    fn test_empty_fixed_fields_skipped() {
        let mut e = entry("a", "Reins", RewardType::Mount, None);
        e.source = Some("  ".into());
        e.requirement = Some("Revered".into());
        assert_eq!(labels(&entry_meta(&e)), ["Requirement"]);
    }

    #[test]
    fn test_extra_metadata_excludes_canonical_columns_and_name() {
        let mut e = entry("a", "Grimoire Reins", RewardType::Mount, Some(100.0));
        e.source_field = Some("Source".into());
        e.metadata.insert("Item".into(), "Grimoire Reins".into());
        e.metadata.insert("Cost".into(), "100".into());
        e.metadata.insert("Source".into(), "Vendor".into());
        e.metadata.insert("Alias".into(), "Grimoire Reins".into());
        e.metadata.insert("Zone".into(), "Broken Shore".into());
        e.metadata.insert("Notes".into(), "Account-wide".into());
        e.metadata.insert("Faction".into(), "Both".into());

        let items = entry_meta(&e);
        assert_eq!(
            items,
            vec![
                MetaItem::new("Zone", "Broken Shore"),
                MetaItem::new("Notes", "Account-wide"),
            ]
        );
    }

    #[test]
    fn test_no_fields_no_items() {
        let e = entry("a", "Reins", RewardType::Mount, None);
        assert!(entry_meta(&e).is_empty());
    }
}
