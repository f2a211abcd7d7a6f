// Prometheus metrics definitions for the guide backend.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ── Gauges ───────────────────────────────────────────────────────

    /// Reward entries in the loaded catalog.
    pub static ref CATALOG_ENTRIES: IntGauge =
        IntGauge::new("guide_catalog_entries", "Reward entries in the loaded catalog").unwrap();

    /// Pages with cached generated copy.
    pub static ref COPY_CACHE_SIZE: IntGauge =
        IntGauge::new("guide_copy_cache_size", "Pages with cached generated copy").unwrap();

    // ── Counters ─────────────────────────────────────────────────────

    /// Paragraph generation runs, by origin (page or adhoc).
    pub static ref COPY_GENERATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("guide_copy_generations_total", "Paragraph generation runs"),
        &["origin"],
    )
    .unwrap();

    /// Page copy served from cache.
    pub static ref COPY_CACHE_HITS_TOTAL: IntCounter = IntCounter::new(
        "guide_copy_cache_hits_total",
        "Page copy served from cache",
    )
    .unwrap();

    /// Catalog queries, by bronze_only flag.
    pub static ref CATALOG_QUERIES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("guide_catalog_queries_total", "Catalog filter queries"),
        &["bronze_only"],
    )
    .unwrap();

    /// Catalog queries whose result list was truncated.
    pub static ref CATALOG_TRUNCATED_TOTAL: IntCounter = IntCounter::new(
        "guide_catalog_truncated_total",
        "Catalog queries with truncated results",
    )
    .unwrap();

    /// Calculator tallies computed.
    pub static ref CALCULATOR_TALLIES_TOTAL: IntCounter = IntCounter::new(
        "guide_calculator_tallies_total",
        "Bronze calculator tallies computed",
    )
    .unwrap();

    /// Total API requests, by method/endpoint/status.
    pub static ref API_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("guide_api_requests_total", "Total API requests"),
        &["method", "endpoint", "status"],
    )
    .unwrap();

    // ── Histograms ───────────────────────────────────────────────────

    /// Word count of generated copy.
    pub static ref GENERATED_WORDS: Histogram = Histogram::with_opts(
        HistogramOpts::new("guide_generated_words", "Word count of generated copy")
            .buckets(vec![100.0, 250.0, 500.0, 820.0, 1000.0, 1500.0, 2500.0, 5000.0]),
    )
    .unwrap();

    /// API request duration in seconds, by endpoint.
    pub static ref API_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "guide_api_request_duration_seconds",
            "API request duration in seconds",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 5.0]),
        &["endpoint"],
    )
    .unwrap();
}

/// Register all metrics with the custom registry. Safe to call more than once.
pub fn register_metrics() {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CATALOG_ENTRIES.clone()),
        Box::new(COPY_CACHE_SIZE.clone()),
        Box::new(COPY_GENERATIONS_TOTAL.clone()),
        Box::new(COPY_CACHE_HITS_TOTAL.clone()),
        Box::new(CATALOG_QUERIES_TOTAL.clone()),
        Box::new(CATALOG_TRUNCATED_TOTAL.clone()),
        Box::new(CALCULATOR_TALLIES_TOTAL.clone()),
        Box::new(API_REQUESTS_TOTAL.clone()),
        Box::new(GENERATED_WORDS.clone()),
        Box::new(API_REQUEST_DURATION_SECONDS.clone()),
    ];

    for c in collectors {
        match REGISTRY.register(c) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => tracing::error!("Failed to register metric: {e}"),
        }
    }
}

/// Serialize all registered metrics to the Prometheus text exposition format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {e}");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Normalize a URL path for metric labels: replace the id segment after
/// `/api/rewards/` and the slug after `/api/seo/pages/` with placeholders.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let mut normalized = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        let parent = if i >= 2 {
            Some((segments[i - 2], segments[i - 1]))
        } else {
            None
        };
        let placeholder = match parent {
            Some(("api", "rewards")) if *segment != "types" => Some(":id"),
            Some(("seo", "pages")) => Some(":slug"),
            _ if segment.parse::<i64>().is_ok() => Some(":id"),
            _ => None,
        };
        normalized.push(placeholder.unwrap_or(*segment));
    }
    normalized.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_no_ids() {
        assert_eq!(normalize_path("/api/rewards"), "/api/rewards");
        assert_eq!(normalize_path("/api/rewards/types"), "/api/rewards/types");
        assert_eq!(normalize_path("/health"), "/health");
    }

    #[test]
    fn test_normalize_path_with_ids() {
        assert_eq!(
            normalize_path("/api/rewards/mount-felscorched-reins"),
            "/api/rewards/:id"
        );
        assert_eq!(
            normalize_path("/api/seo/pages/bronze-calculator"),
            "/api/seo/pages/:slug"
        );
        assert_eq!(normalize_path("/assets/42/logo.png"), "/assets/:id/logo.png");
    }

    #[test]
    fn test_normalize_path_preserves_non_numeric() {
        assert_eq!(normalize_path("/api/seo/pages"), "/api/seo/pages");
        assert_eq!(normalize_path("/api/calculator/tally"), "/api/calculator/tally");
    }

    #[test]
    fn test_gather_metrics_returns_string() {
        register_metrics();
        register_metrics();
        let output = gather_metrics();
        assert!(output.is_empty() || output.contains("guide_"));
    }

    #[test]
    fn test_metric_increments() {
        CATALOG_ENTRIES.set(20);
        assert_eq!(CATALOG_ENTRIES.get(), 20);

        COPY_GENERATIONS_TOTAL.with_label_values(&["page"]).inc();
        COPY_CACHE_HITS_TOTAL.inc();
        CATALOG_QUERIES_TOTAL.with_label_values(&["true"]).inc();
        CATALOG_TRUNCATED_TOTAL.inc();
        CALCULATOR_TALLIES_TOTAL.inc();
        GENERATED_WORDS.observe(832.0);
        API_REQUEST_DURATION_SECONDS
            .with_label_values(&["/api/rewards"])
            .observe(0.002);
        API_REQUESTS_TOTAL
            .with_label_values(&["GET", "/api/rewards", "200"])
            .inc();
    }
}
