//! Router builder utilities for the sales routes

use super::handlers::{AppState, get_filter_options, health_check, list_sales};
use axum::{Router, routing::get};

/// Build the sales API routes
///
/// - GET /api/sales - Search, filter, sort and paginate records
/// - GET /api/sales/filters - Filter options
/// - GET /api/health - Health check
pub fn build_sales_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/sales", get(list_sales))
        .route("/api/sales/filters", get(get_filter_options))
        .route("/api/health", get(health_check))
        .with_state(state)
}

/// Build the top-level health routes
pub fn build_health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .with_state(state)
}
