// Per-page SEO copy configuration, loaded from JSON.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::generator::{generate_copy, GeneratedCopy, GeneratorOptions};
use super::text::normalize_whitespace;
use super::SeoError;

/// Bundled page configuration used when no path is configured.
pub const BUNDLED_PAGES: &str = include_str!("../../data/seo_pages.json");

#[derive(Debug, thiserror::Error)]
pub enum PageConfigError {
    #[error("failed to read page config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse page config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate page slug: {0}")]
    DuplicateSlug(String),
    #[error("page {0} has an empty keyword")]
    EmptyKeyword(String),
}

/// Keyword and subject matter for one guide page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCopyConfig {
    pub slug: String,
    pub title: String,
    pub keyword: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub supporting_concepts: Vec<String>,
    #[serde(default)]
    pub options: GeneratorOptions,
}

impl PageCopyConfig {
    pub fn generate(&self) -> Result<GeneratedCopy, SeoError> {
        generate_copy(
            &self.keyword,
            &self.topics,
            &self.supporting_concepts,
            &self.options,
        )
    }
}

/// All configured pages, in file order.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pages: Vec<PageCopyConfig>,
}

impl PageRegistry {
    pub fn from_json(json: &str) -> Result<Self, PageConfigError> {
        let pages: Vec<PageCopyConfig> = serde_json::from_str(json)?;
        Self::new(pages)
    }

    pub fn from_path(path: &Path) -> Result<Self, PageConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn bundled() -> Result<Self, PageConfigError> {
        Self::from_json(BUNDLED_PAGES)
    }

    pub fn new(pages: Vec<PageCopyConfig>) -> Result<Self, PageConfigError> {
        let mut seen = HashSet::new();
        for page in &pages {
            if !seen.insert(page.slug.as_str()) {
                return Err(PageConfigError::DuplicateSlug(page.slug.clone()));
            }
            if normalize_whitespace(&page.keyword).is_empty() {
                return Err(PageConfigError::EmptyKeyword(page.slug.clone()));
            }
        }
        Ok(Self { pages })
    }

    pub fn get(&self, slug: &str) -> Option<&PageCopyConfig> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    pub fn pages(&self) -> &[PageCopyConfig] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::{MAX_KEYWORD_RATIO, MIN_KEYWORD_RATIO};

    #[test]
    fn test_bundled_pages_load() {
        let registry = PageRegistry::bundled().unwrap();
        assert!(!registry.is_empty());
        assert!(registry.get("bronze-calculator").is_some());
    }

    #[test]
    fn test_bundled_pages_generate_within_band() {
        let registry = PageRegistry::bundled().unwrap();
        for page in registry.pages() {
            let copy = page.generate().unwrap();
            assert!(!copy.paragraphs.is_empty(), "{} produced no copy", page.slug);
            assert!(
                copy.stats.density >= MIN_KEYWORD_RATIO && copy.stats.density <= MAX_KEYWORD_RATIO,
                "{} density {}",
                page.slug,
                copy.stats.density
            );
        }
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let json = r#"[
            {"slug": "a", "title": "A", "keyword": "Bronze"},
            {"slug": "a", "title": "A again", "keyword": "Bronze"}
        ]"#;
        let err = PageRegistry::from_json(json).unwrap_err();
        assert!(matches!(err, PageConfigError::DuplicateSlug(s) if s == "a"));
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let json = r#"[{"slug": "a", "title": "A", "keyword": "  "}]"#;
        let err = PageRegistry::from_json(json).unwrap_err();
        assert!(matches!(err, PageConfigError::EmptyKeyword(_)));
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"[{"slug": "a", "title": "A", "keyword": "Bronze"}]"#;
        let registry = PageRegistry::from_json(json).unwrap();
        let page = registry.get("a").unwrap();
        assert!(page.topics.is_empty());
        assert_eq!(page.options, GeneratorOptions::default());
    }

    #[test]
    fn test_options_parse_camel_case() {
        let json = r#"[{"slug": "a", "title": "A", "keyword": "Bronze",
            "options": {"minWords": 400, "targetDensity": 0.04, "minParagraphKeywordOccurrences": 4}}]"#;
        let registry = PageRegistry::from_json(json).unwrap();
        let options = &registry.get("a").unwrap().options;
        assert_eq!(options.min_words, Some(400));
        assert_eq!(options.target_density, Some(0.04));
        assert_eq!(options.min_paragraph_keyword_occurrences, Some(4));
    }
}
