// SEO copy generation: keyword-density paragraphs and per-page configuration.

pub mod generator;
pub mod pages;
pub mod text;

pub use generator::{
    build_keyword_rich_paragraphs, density_growth_budget, generate_copy, keyword_stats,
    GeneratedCopy, GeneratorOptions, GeneratorSettings, MAX_KEYWORD_RATIO, MIN_KEYWORD_RATIO, MIN_PAGE_WORDS,
    MIN_PARAGRAPH_KEYWORD_OCCURRENCES,
};
pub use pages::{PageConfigError, PageCopyConfig, PageRegistry};
pub use text::{KeywordMatcher, KeywordStats};

#[derive(Debug, thiserror::Error)]
pub enum SeoError {
    #[error("keyword must not be empty")]
    EmptyKeyword,
    #[error("keyword cannot be matched: {0}")]
    Pattern(#[from] regex::Error),
}
