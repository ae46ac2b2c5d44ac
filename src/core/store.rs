//! Store trait shared by every backend

use crate::core::options::FilterOptions;
use crate::core::query::{PaginationMeta, SalesQuery};
use crate::core::summary::SalesSummary;
use crate::core::transaction::Transaction;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One page of query results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPage {
    /// Records inside the requested window, in result order
    pub data: Vec<Transaction>,

    pub pagination: PaginationMeta,

    /// Totals over every matching record, not only this page
    pub summary: SalesSummary,
}

/// A queryable source of sales transactions
///
/// Implementations must give identical answers for the same logical query
/// over the same data: same records, same order (ties resolve to ingestion
/// order), same pagination metadata. The orchestrator is written once
/// against this trait and never inspects which backend it talks to.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Short backend name used in logs and errors (e.g. `"mysql"`)
    fn backend(&self) -> &'static str;

    /// Run search, filters, sort and pagination for one request
    async fn query(&self, query: &SalesQuery) -> Result<SalesPage>;

    /// Facet values for filter controls
    async fn filter_options(&self) -> Result<FilterOptions>;
}
