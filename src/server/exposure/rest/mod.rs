//! REST API exposure
//!
//! Consumes the shared [`AppState`] and produces an Axum `Router` with the
//! health routes, the sales routes, any custom routes and request tracing.

use crate::server::handlers::AppState;
use crate::server::router::{build_health_routes, build_sales_routes};
use axum::Router;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// # Arguments
    ///
    /// * `state` - Handler state holding the sales service
    /// * `custom_routes` - Additional custom routes to merge
    pub fn build_router(state: AppState, custom_routes: Vec<Router>) -> Router {
        let mut app = build_health_routes(state.clone()).merge(build_sales_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.layer(TraceLayer::new_for_http())
    }
}
