use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use remix_guide_backend::{api, metrics, Config, PageRegistry, RewardCatalog};

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "remix-guide-backend" }))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::load();
    metrics::register_metrics();

    let catalog = match &config.catalog_path {
        Some(path) => RewardCatalog::from_path(path),
        None => RewardCatalog::bundled(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to load reward catalog: {e}");
            std::process::exit(1);
        }
    };

    let pages = match &config.pages_path {
        Some(path) => PageRegistry::from_path(path),
        None => PageRegistry::bundled(),
    };
    let pages = match pages {
        Ok(pages) => pages,
        Err(e) => {
            tracing::error!("Failed to load SEO page config: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        rewards = catalog.len(),
        bronze = catalog.bronze_entries().len(),
        pages = pages.len(),
        "Loaded guide data"
    );

    let state = api::AppState::new(catalog, pages, config.max_words);

    let mut app = Router::new()
        .route("/health", get(health_check))
        .merge(api::router(state))
        .layer(CorsLayer::permissive());

    if let Some(dir) = &config.static_dir {
        tracing::info!("Serving static files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("Failed to bind HTTP port");

    tracing::info!("Guide backend listening on port {}", config.port);
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
