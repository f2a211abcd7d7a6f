pub mod api;
pub mod catalog;
pub mod config;
pub mod copy_cache;
pub mod llms_txt;
pub mod metrics;
pub mod seo;

// Re-export commonly used types
pub use api::{router, AppState};
pub use catalog::{filter_and_aggregate, CatalogQuery, RewardCatalog, RewardEntry};
pub use config::Config;
pub use seo::{build_keyword_rich_paragraphs, GeneratorOptions, PageRegistry};
