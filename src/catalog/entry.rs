// Reward record data model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of reward a record unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardType {
    Mount,
    Pet,
    Toy,
    Transmog,
    Ensemble,
    Arsenal,
    Illusion,
    Title,
    Heirloom,
    Decor,
    #[serde(other)]
    Other,
}

impl RewardType {
    pub const ALL: [RewardType; 11] = [
        RewardType::Mount,
        RewardType::Pet,
        RewardType::Toy,
        RewardType::Transmog,
        RewardType::Ensemble,
        RewardType::Arsenal,
        RewardType::Illusion,
        RewardType::Title,
        RewardType::Heirloom,
        RewardType::Decor,
        RewardType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RewardType::Mount => "mount",
            RewardType::Pet => "pet",
            RewardType::Toy => "toy",
            RewardType::Transmog => "transmog",
            RewardType::Ensemble => "ensemble",
            RewardType::Arsenal => "arsenal",
            RewardType::Illusion => "illusion",
            RewardType::Title => "title",
            RewardType::Heirloom => "heirloom",
            RewardType::Decor => "decor",
            RewardType::Other => "other",
        }
    }

    /// Parse a tag as written in catalog data (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for RewardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price of a purchasable reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Cost {
    pub const DEFAULT_CURRENCY: &'static str = "Bronze";

    pub fn currency_or_default(&self) -> &str {
        self.currency.as_deref().unwrap_or(Self::DEFAULT_CURRENCY)
    }
}

/// One row of a reward table.
///
/// The `*_field` members name the source table columns that the canonical
/// fields were read from; `metadata` keeps every column in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub reward_type: RewardType,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement: Option<String>,
    pub section_title: String,
    pub table_key: String,
    pub table_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_heading: Option<String>,
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
    pub name_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement_field: Option<String>,
}

impl RewardEntry {
    /// Purchasable with Bronze (carries a cost).
    pub fn is_bronze(&self) -> bool {
        self.cost.is_some()
    }

    /// Cost amount, treating a missing cost as zero.
    pub fn cost_amount(&self) -> f64 {
        self.cost.as_ref().map_or(0.0, |c| c.amount)
    }

    /// Phase value, read from the metadata column named by `phase_field`.
    pub fn phase(&self) -> Option<&str> {
        self.phase_field
            .as_deref()
            .and_then(|field| self.metadata.get(field))
            .map(String::as_str)
    }

    /// Lower-cased text that free-text search runs against.
    pub fn search_haystack(&self) -> String {
        let fields = [
            Some(self.name.as_str()),
            self.source.as_deref(),
            self.requirement.as_deref(),
            self.achievement.as_deref(),
            Some(self.table_label.as_str()),
            self.table_heading.as_deref(),
            Some(self.section_title.as_str()),
        ];
        fields
            .into_iter()
            .flatten()
            .chain(self.metadata.values().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}
