//! Router Assembly
//!
//! Builds the full application router: the two collection APIs nested
//! under `/api/lenders` and `/api/quotes`, liveness and metrics probes,
//! and the static frontend served as the fallback for everything else.
//! CORS stays permissive; the API is meant to sit behind whatever
//! origin the frontend is served from.

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::adapters::http::handlers;
use crate::adapters::metrics::ApiMetrics;
use crate::usecases::CollectionService;

/// Assemble the application router.
///
/// `public_dir` is served for any path no API route claims, which is
/// how the bundled frontend reaches the browser. Passing `None` for
/// `metrics` leaves the exposition endpoint unmounted; counters are
/// still recorded either way.
pub fn app_router(
    lenders: Arc<CollectionService>,
    quotes: Arc<CollectionService>,
    metrics: Option<Arc<ApiMetrics>>,
    public_dir: &Path,
) -> Router {
    let mut router = Router::new()
        .nest("/api/lenders", collection_routes(lenders))
        .nest("/api/quotes", collection_routes(quotes))
        .route("/health", get(health));

    if let Some(metrics) = metrics {
        router = router.route("/metrics", get(render_metrics).with_state(metrics));
    }

    router
        .fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// The five endpoints every collection exposes.
///
/// `/import` must be registered alongside `/:id`; axum prefers the
/// static segment, so `POST /import` never parses as an id.
fn collection_routes(service: Arc<CollectionService>) -> Router {
    Router::new()
        .route("/", get(handlers::list).post(handlers::create))
        .route("/import", post(handlers::import))
        .route("/:id", put(handlers::update).delete(handlers::remove))
        .with_state(service)
}

/// Liveness probe.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Prometheus exposition endpoint.
async fn render_metrics(State(metrics): State<Arc<ApiMetrics>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics.render(),
    )
}
