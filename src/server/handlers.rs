//! HTTP handlers for the sales endpoints
//!
//! Handlers only translate between the wire and [`SalesService`]: raw query
//! parameters are normalized with [`QueryParams`], results are wrapped in the
//! `{ success, data, ... }` envelope.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::error::SalesError;
use crate::core::options::FilterOptions;
use crate::core::pipeline::SalesService;
use crate::core::query::{PaginationMeta, QueryParams};
use crate::core::summary::SalesSummary;
use crate::core::transaction::Transaction;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SalesService>,
    /// Page size applied when a request carries none
    pub default_page_size: i64,
}

/// Response for the list endpoint
#[derive(Debug, Serialize)]
pub struct SalesResponse {
    pub success: bool,
    pub data: Vec<Transaction>,
    pub pagination: PaginationMeta,
    pub summary: SalesSummary,
}

/// Response for the filter-options endpoint
#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    pub success: bool,
    pub data: FilterOptions,
}

/// List sales records
///
/// GET /api/sales?search=...&regions=North&regions=South&sortBy=quantity&page=2
pub async fn list_sales(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<SalesResponse>, SalesError> {
    let Query(pairs) = query.map_err(|e| SalesError::InvalidRequest(e.body_text()))?;

    let request = QueryParams::from_pairs(pairs).into_query_with(state.default_page_size);
    let page = state.service.list(&request).await?;

    Ok(Json(SalesResponse {
        success: true,
        data: page.data,
        pagination: page.pagination,
        summary: page.summary,
    }))
}

/// Facet values for the filter controls
///
/// GET /api/sales/filters
pub async fn get_filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>, SalesError> {
    let options = state.service.filter_options().await?;

    Ok(Json(FilterOptionsResponse {
        success: true,
        data: options,
    }))
}

/// Health check
///
/// GET /health and GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "sales-rs",
        "backend": state.service.backend(),
    }))
}
