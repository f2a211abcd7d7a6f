// In-memory cache of generated page copy, keyed by page slug.
//
// Generation is deterministic, so an entry never goes stale while the page
// registry it was built from is loaded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::metrics;
use crate::seo::{GeneratedCopy, PageCopyConfig, SeoError};

/// Thread-safe page copy cache.
#[derive(Debug, Clone, Default)]
pub struct CopyCache {
    inner: Arc<Mutex<HashMap<String, Arc<GeneratedCopy>>>>,
}

impl CopyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cached copy for `page`, generating and storing it on a miss.
    pub fn get_or_generate(&self, page: &PageCopyConfig) -> Result<Arc<GeneratedCopy>, SeoError> {
        if let Some(copy) = self.inner.lock().unwrap().get(&page.slug) {
            metrics::COPY_CACHE_HITS_TOTAL.inc();
            return Ok(copy.clone());
        }

        // Generate outside the lock; a concurrent miss produces identical copy.
        let copy = Arc::new(page.generate()?);
        metrics::COPY_GENERATIONS_TOTAL
            .with_label_values(&["page"])
            .inc();
        metrics::GENERATED_WORDS.observe(copy.stats.word_count as f64);
        tracing::info!(
            slug = %page.slug,
            paragraphs = copy.paragraphs.len(),
            words = copy.stats.word_count,
            "generated page copy"
        );

        let mut map = self.inner.lock().unwrap();
        let entry = map.entry(page.slug.clone()).or_insert(copy).clone();
        metrics::COPY_CACHE_SIZE.set(map.len() as i64);
        Ok(entry)
    }

    /// Number of cached pages.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached page.
    pub fn clear(&self) {
        let mut map = self.inner.lock().unwrap();
        map.clear();
        metrics::COPY_CACHE_SIZE.set(0);
    }
}
