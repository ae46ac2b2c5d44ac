//! Query pipeline orchestration
//!
//! [`run`] composes the four in-memory stages in their fixed order:
//! search → filter → sort → paginate. [`SalesService`] is the single entry
//! point used by the transport: it forwards one logical request to whichever
//! [`TransactionStore`] it was constructed with.

use crate::core::error::SalesError;
use crate::core::filter::{filter, search};
use crate::core::options::FilterOptions;
use crate::core::query::{SalesQuery, paginate};
use crate::core::sort::sort;
use crate::core::store::{SalesPage, TransactionStore};
use crate::core::summary::SalesSummary;
use crate::core::transaction::Transaction;
use std::sync::Arc;
use std::time::Instant;

/// Run the full pipeline over a resident record set
///
/// The slice is only read; the returned page holds clones of the records
/// inside the window.
pub fn run(records: &[Transaction], query: &SalesQuery) -> SalesPage {
    let view: Vec<&Transaction> = records.iter().collect();

    let view = search(view, query.search.as_deref());
    let view = filter(view, &query.filters);
    let summary = SalesSummary::from_records(view.iter().copied());
    let view = sort(view, &query.sort);
    let page = paginate(&view, query.page);

    SalesPage {
        data: page.data.into_iter().cloned().collect(),
        pagination: page.pagination,
        summary,
    }
}

/// Orchestrator over a configured store
///
/// Cheap to clone; all clones share the same store.
#[derive(Clone)]
pub struct SalesService {
    store: Arc<dyn TransactionStore>,
}

impl SalesService {
    pub fn new(store: impl TransactionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_arc(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Answer one query request
    pub async fn list(&self, query: &SalesQuery) -> Result<SalesPage, SalesError> {
        let started = Instant::now();
        let backend = self.store.backend();

        let page = self.store.query(query).await.map_err(|e| {
            tracing::error!(backend, error = %e, "Sales query failed");
            SalesError::storage(backend, format!("{:#}", e))
        })?;

        tracing::debug!(
            backend,
            search = ?query.search,
            sort = ?query.sort,
            page = query.page.number,
            page_size = query.page.size,
            total = page.pagination.total_items,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Sales query served"
        );

        Ok(page)
    }

    /// Facet values for filter controls
    pub async fn filter_options(&self) -> Result<FilterOptions, SalesError> {
        let backend = self.store.backend();
        self.store.filter_options().await.map_err(|e| {
            tracing::error!(backend, error = %e, "Filter options query failed");
            SalesError::storage(backend, format!("{:#}", e))
        })
    }
}
