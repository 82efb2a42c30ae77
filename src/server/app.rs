use anyhow::{anyhow, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{case_stats, health};
use crate::services::CaseStatsService;

const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub service: CaseStatsService,
}

pub fn create_app(service: CaseStatsService, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState { service };

    let methods = [
        axum::http::Method::GET,
        axum::http::Method::POST,
        axum::http::Method::OPTIONS,
    ];
    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<axum::http::HeaderValue>()
                    .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
            )
            .allow_methods(methods)
            .allow_headers(Any)
            .expose_headers(Any)
            .allow_credentials(false),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
            .expose_headers(Any)
            .allow_credentials(false),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/case-stats", case_stats_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    Ok(app)
}

fn case_stats_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/import-excel",
            post(case_stats::import_excel).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/batches", get(case_stats::list_batches))
        .route("/batches/:id/details", get(case_stats::list_details))
        .route("/batches/:id/analysis", get(case_stats::get_analysis))
        .route("/batches/:id/report", post(case_stats::regenerate_report))
        .route("/batches/:id/report-download", get(case_stats::download_report))
}
