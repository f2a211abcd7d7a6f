// Reward catalog: the immutable set of reward records the calculator works over.

pub mod calculator;
pub mod entry;
pub mod filter;
pub mod meta;

use std::collections::HashSet;
use std::path::Path;

pub use calculator::{tally_selection, SelectionTally};
pub use entry::{Cost, RewardEntry, RewardType};
pub use filter::{
    filter_and_aggregate, paginate, CatalogQuery, FilterOutcome, Page, TypeFilter,
    DEFAULT_PER_PAGE, MAX_RESULTS,
};
pub use meta::{entry_meta, MetaItem};

/// Bundled reward data used when no catalog path is configured.
pub const BUNDLED_CATALOG: &str = include_str!("../../data/rewards.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate reward id: {0}")]
    DuplicateId(String),
    #[error("reward {id} has invalid cost {amount}")]
    InvalidCost { id: String, amount: f64 },
}

/// Validated, read-only reward records in source order.
#[derive(Debug, Clone, Default)]
pub struct RewardCatalog {
    entries: Vec<RewardEntry>,
}

impl RewardCatalog {
    /// Validate ids and costs. Ids must be unique; amounts finite and non-negative.
    pub fn new(entries: Vec<RewardEntry>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        for entry in &entries {
            if !ids.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
            if let Some(cost) = &entry.cost {
                if !cost.amount.is_finite() || cost.amount < 0.0 {
                    return Err(CatalogError::InvalidCost {
                        id: entry.id.clone(),
                        amount: cost.amount,
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<RewardEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn entries(&self) -> &[RewardEntry] {
        &self.entries
    }

    /// Entries purchasable with Bronze, in source order.
    pub fn bronze_entries(&self) -> Vec<&RewardEntry> {
        self.entries.iter().filter(|e| e.is_bronze()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&RewardEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Distinct reward types in first-seen order.
    pub fn types(&self) -> Vec<RewardType> {
        let mut types = Vec::new();
        for entry in &self.entries {
            if !types.contains(&entry.reward_type) {
                types.push(entry.reward_type);
            }
        }
        types
    }

    pub fn query(&self, query: &CatalogQuery) -> FilterOutcome<'_> {
        filter_and_aggregate(&self.entries, query)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
