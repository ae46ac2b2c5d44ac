//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::handlers::AppState;
use crate::config::AppConfig;
use crate::core::pipeline::SalesService;
use crate::core::query::DEFAULT_PAGE_SIZE;
use crate::core::store::TransactionStore;
use crate::storage;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the sales HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryTransactionStore::new(records))
///     .build()?;
/// ```
pub struct ServerBuilder {
    service: Option<Arc<SalesService>>,
    default_page_size: i64,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            service: None,
            default_page_size: DEFAULT_PAGE_SIZE,
            custom_routes: Vec::new(),
        }
    }

    /// Connect the configured store and apply the pagination settings
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let store = storage::connect(&config.store, config.facet_policy()).await?;

        Ok(Self::new()
            .with_service(SalesService::from_arc(store))
            .with_default_page_size(config.pagination.default_page_size))
    }

    /// Set the sales service (required)
    pub fn with_service(mut self, service: SalesService) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    /// Shorthand for a service over `store`
    pub fn with_store(self, store: impl TransactionStore + 'static) -> Self {
        self.with_service(SalesService::new(store))
    }

    pub fn with_default_page_size(mut self, page_size: i64) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        let service = self
            .service
            .ok_or_else(|| anyhow::anyhow!("SalesService is required. Call .with_service()"))?;

        let state = AppState {
            service,
            default_page_size: self.default_page_size,
        };

        Ok(RestExposure::build_router(state, self.custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
