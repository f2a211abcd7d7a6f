// Text measurement helpers shared by the paragraph generator.

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use super::SeoError;

/// Collapse every run of whitespace into a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Case-insensitive matcher for a literal keyword.
///
/// Matches are plain substrings, not whole words: `cat` is found inside
/// `category`. Density targets are calibrated against this looser count.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    pattern: Regex,
}

impl KeywordMatcher {
    /// Build a matcher for `keyword`. Surrounding and repeated inner whitespace
    /// is normalized first so the keyword can match normalized paragraphs.
    pub fn new(keyword: &str) -> Result<Self, SeoError> {
        let keyword = normalize_whitespace(keyword);
        if keyword.is_empty() {
            return Err(SeoError::EmptyKeyword);
        }
        let pattern = RegexBuilder::new(&regex::escape(&keyword))
            .case_insensitive(true)
            .build()?;
        Ok(Self { keyword, pattern })
    }

    /// The normalized keyword text.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Count non-overlapping occurrences in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

/// Aggregate word/keyword figures for a block of copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordStats {
    pub word_count: usize,
    pub keyword_count: usize,
    pub density: f64,
}

impl KeywordStats {
    pub fn measure(text: &str, matcher: &KeywordMatcher) -> Self {
        Self::from_counts(count_words(text), matcher.count(text))
    }

    pub fn from_counts(word_count: usize, keyword_count: usize) -> Self {
        Self {
            word_count,
            keyword_count,
            density: keyword_count as f64 / word_count.max(1) as f64,
        }
    }
}

/// Stats over a paragraph set, measured on the paragraphs joined by spaces.
pub fn paragraph_stats(paragraphs: &[String], matcher: &KeywordMatcher) -> KeywordStats {
    KeywordStats::measure(&paragraphs.join(" "), matcher)
}
