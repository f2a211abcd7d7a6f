// HTTP API routes (reward catalog, Bronze calculator, SEO copy).

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Json, Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::{
    headers::{ETag, IfNoneMatch},
    TypedHeader,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::catalog::{
    entry_meta, paginate, tally_selection, CatalogQuery, MetaItem, Page, RewardCatalog,
    RewardEntry, TypeFilter, DEFAULT_PER_PAGE,
};
use crate::copy_cache::CopyCache;
use crate::metrics;
use crate::seo::{generate_copy, GeneratorOptions, PageRegistry, SeoError};

/// Most topics or supporting concepts accepted per generation request.
pub const MAX_LIST_ITEMS: usize = 16;
/// Highest per-paragraph keyword floor accepted per generation request.
pub const MAX_KEYWORD_OCCURRENCES: usize = 50;
/// Longest keyword, topic or supporting concept accepted, in bytes.
pub const MAX_TEXT_BYTES: usize = 200;
/// Most reward ids accepted in one calculator tally.
pub const MAX_TALLY_IDS: usize = 1000;

// ── Request types ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateParagraphsRequest {
    pub keyword: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub supporting_concepts: Vec<String>,
    #[serde(default)]
    pub options: GeneratorOptions,
}

#[derive(Deserialize)]
pub struct RewardQueryParams {
    #[serde(rename = "type")]
    pub reward_type: Option<String>,
    pub q: Option<String>,
    pub bronze_only: Option<bool>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Deserialize)]
pub struct TallyRequest {
    pub ids: Vec<String>,
}

// ── Response types ────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardListResponse<'a> {
    pub total_matched: usize,
    pub truncated: bool,
    pub displayed_count: usize,
    pub displayed_cost_sum: f64,
    pub results: Page<&'a RewardEntry>,
}

#[derive(Serialize)]
pub struct RewardDetailResponse<'a> {
    pub entry: &'a RewardEntry,
    pub meta: Vec<MetaItem>,
}

#[derive(Serialize)]
pub struct PageSummary<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub keyword: &'a str,
}

// ── Shared application state ─────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RewardCatalog>,
    pub pages: Arc<PageRegistry>,
    pub copy_cache: CopyCache,
    pub max_words: usize,
}

impl AppState {
    pub fn new(catalog: RewardCatalog, pages: PageRegistry, max_words: usize) -> Self {
        metrics::CATALOG_ENTRIES.set(catalog.len() as i64);
        Self {
            catalog: Arc::new(catalog),
            pages: Arc::new(pages),
            copy_cache: CopyCache::new(),
            max_words,
        }
    }
}

// ── Error helper ──────────────────────────────────────────────────────

fn json_error(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "error": msg }))).into_response()
}

fn seo_error(e: SeoError) -> Response {
    match e {
        SeoError::EmptyKeyword => json_error(StatusCode::BAD_REQUEST, "keyword is required"),
        SeoError::Pattern(e) => {
            tracing::warn!("Keyword rejected by matcher: {e}");
            json_error(StatusCode::BAD_REQUEST, "keyword is too large")
        }
    }
}

/// Serialize `value` as JSON with a content-hash ETag; answer 304 when the
/// client already holds the same representation.
fn json_with_etag<T: Serialize>(value: &T, if_none_match: Option<IfNoneMatch>) -> Response {
    let body = match serde_json::to_vec(value) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Failed to serialize response: {e}");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };
    let etag: ETag = match format!("\"{}\"", hex::encode(Sha256::digest(&body))).parse() {
        Ok(etag) => etag,
        Err(_) => {
            return (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body)
                .into_response()
        }
    };

    if let Some(if_none_match) = if_none_match {
        if !if_none_match.precondition_passes(&etag) {
            return (StatusCode::NOT_MODIFIED, TypedHeader(etag)).into_response();
        }
    }
    (
        StatusCode::OK,
        TypedHeader(etag),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

// ── Router ────────────────────────────────────────────────────────────

pub fn router(state: AppState) -> Router {
    Router::new()
        // Rewards
        .route("/api/rewards", get(list_rewards))
        .route("/api/rewards/types", get(list_reward_types))
        .route("/api/rewards/{id}", get(get_reward))
        // Calculator
        .route("/api/calculator/tally", post(tally))
        // SEO copy
        .route("/api/seo/pages", get(list_pages))
        .route("/api/seo/pages/{slug}", get(get_page_copy))
        .route("/api/seo/paragraphs", post(generate_paragraphs))
        // Documentation and metrics
        .route("/llms.txt", get(get_llms_txt))
        .route("/metrics", get(get_metrics))
        .with_state(state)
        .layer(axum::middleware::from_fn(track_requests))
}

/// Record request count and latency per normalized path.
async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let endpoint = metrics::normalize_path(req.uri().path());
    let start = Instant::now();

    let response = next.run(req).await;

    metrics::API_REQUEST_DURATION_SECONDS
        .with_label_values(&[endpoint.as_str()])
        .observe(start.elapsed().as_secs_f64());
    metrics::API_REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), endpoint.as_str(), response.status().as_str()])
        .inc();
    response
}

// ── Reward handlers ───────────────────────────────────────────────────

async fn list_rewards(
    State(state): State<AppState>,
    Query(params): Query<RewardQueryParams>,
    if_none_match: Option<TypedHeader<IfNoneMatch>>,
) -> Response {
    let type_filter = match params.reward_type.as_deref() {
        None | Some("") => TypeFilter::All,
        Some(raw) => match TypeFilter::parse(raw) {
            Some(filter) => filter,
            None => {
                return json_error(StatusCode::BAD_REQUEST, &format!("unknown reward type: {raw}"))
            }
        },
    };
    let query = CatalogQuery {
        type_filter,
        search: params.q.unwrap_or_default(),
        bronze_only: params.bronze_only.unwrap_or(false),
    };

    let outcome = state.catalog.query(&query);
    metrics::CATALOG_QUERIES_TOTAL
        .with_label_values(&[if query.bronze_only { "true" } else { "false" }])
        .inc();
    if outcome.truncated {
        metrics::CATALOG_TRUNCATED_TOTAL.inc();
    }

    let results = paginate(
        &outcome.displayed,
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(DEFAULT_PER_PAGE),
    );
    let response = RewardListResponse {
        total_matched: outcome.total_matched,
        truncated: outcome.truncated,
        displayed_count: outcome.displayed.len(),
        displayed_cost_sum: outcome.displayed_cost_sum,
        results,
    };
    json_with_etag(&response, if_none_match.map(|TypedHeader(h)| h))
}

async fn list_reward_types(State(state): State<AppState>) -> Response {
    (StatusCode::OK, Json(json!(state.catalog.types()))).into_response()
}

async fn get_reward(
    State(state): State<AppState>,
    Path(id): Path<String>,
    if_none_match: Option<TypedHeader<IfNoneMatch>>,
) -> Response {
    match state.catalog.get(&id) {
        Some(entry) => {
            let response = RewardDetailResponse {
                entry,
                meta: entry_meta(entry),
            };
            json_with_etag(&response, if_none_match.map(|TypedHeader(h)| h))
        }
        None => json_error(StatusCode::NOT_FOUND, "Reward not found"),
    }
}

// ── Calculator handlers ───────────────────────────────────────────────

async fn tally(State(state): State<AppState>, Json(req): Json<TallyRequest>) -> Response {
    if req.ids.len() > MAX_TALLY_IDS {
        return json_error(
            StatusCode::BAD_REQUEST,
            &format!("at most {MAX_TALLY_IDS} ids per tally"),
        );
    }
    let tally = tally_selection(&state.catalog, &req.ids);
    metrics::CALCULATOR_TALLIES_TOTAL.inc();
    (StatusCode::OK, Json(json!(tally))).into_response()
}

// ── SEO handlers ──────────────────────────────────────────────────────

async fn list_pages(State(state): State<AppState>) -> Response {
    let pages: Vec<PageSummary> = state
        .pages
        .pages()
        .iter()
        .map(|p| PageSummary {
            slug: &p.slug,
            title: &p.title,
            keyword: &p.keyword,
        })
        .collect();
    (StatusCode::OK, Json(json!(pages))).into_response()
}

async fn get_page_copy(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    if_none_match: Option<TypedHeader<IfNoneMatch>>,
) -> Response {
    let Some(page) = state.pages.get(&slug) else {
        return json_error(StatusCode::NOT_FOUND, "Page not found");
    };
    match state.copy_cache.get_or_generate(page) {
        Ok(copy) => {
            let body = json!({
                "slug": page.slug,
                "title": page.title,
                "keyword": page.keyword,
                "paragraphs": copy.paragraphs,
                "stats": copy.stats,
            });
            json_with_etag(&body, if_none_match.map(|TypedHeader(h)| h))
        }
        Err(e) => {
            tracing::error!(slug = %slug, "Page copy generation failed: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

async fn generate_paragraphs(
    State(state): State<AppState>,
    Json(req): Json<GenerateParagraphsRequest>,
) -> Response {
    if req.topics.len() > MAX_LIST_ITEMS || req.supporting_concepts.len() > MAX_LIST_ITEMS {
        return json_error(
            StatusCode::BAD_REQUEST,
            &format!("at most {MAX_LIST_ITEMS} topics and supporting concepts"),
        );
    }
    let too_long = |text: &String| text.len() > MAX_TEXT_BYTES;
    if too_long(&req.keyword)
        || req.topics.iter().any(too_long)
        || req.supporting_concepts.iter().any(too_long)
    {
        return json_error(
            StatusCode::BAD_REQUEST,
            &format!("keyword, topics and supporting concepts are limited to {MAX_TEXT_BYTES} bytes each"),
        );
    }
    if req.options.min_words.is_some_and(|w| w > state.max_words) {
        return json_error(
            StatusCode::BAD_REQUEST,
            &format!("minWords must not exceed {}", state.max_words),
        );
    }
    if req
        .options
        .min_paragraph_keyword_occurrences
        .is_some_and(|n| n > MAX_KEYWORD_OCCURRENCES)
    {
        return json_error(
            StatusCode::BAD_REQUEST,
            &format!("minParagraphKeywordOccurrences must not exceed {MAX_KEYWORD_OCCURRENCES}"),
        );
    }

    match generate_copy(
        &req.keyword,
        &req.topics,
        &req.supporting_concepts,
        &req.options,
    ) {
        Ok(copy) => {
            metrics::COPY_GENERATIONS_TOTAL
                .with_label_values(&["adhoc"])
                .inc();
            metrics::GENERATED_WORDS.observe(copy.stats.word_count as f64);
            (StatusCode::OK, Json(json!(copy))).into_response()
        }
        Err(e) => seo_error(e),
    }
}

// ── Documentation handlers ────────────────────────────────────────────

async fn get_llms_txt() -> Response {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        crate::llms_txt::LLMS_TXT,
    )
        .into_response()
}

async fn get_metrics() -> Response {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
        .into_response()
}
