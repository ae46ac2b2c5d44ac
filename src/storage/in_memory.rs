//! In-memory transaction store
//!
//! Holds the whole record set resident and answers every request with the
//! in-process pipeline. Filter options are computed once at construction.

use crate::core::options::{FacetPolicy, FilterOptions, compute_filter_options};
use crate::core::pipeline;
use crate::core::query::SalesQuery;
use crate::core::store::{SalesPage, TransactionStore};
use crate::core::transaction::Transaction;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Resident, read-only transaction store
///
/// Records keep their load order, which is the ingestion order used to
/// break sort ties. Cloning is cheap and shares the data.
#[derive(Clone, Debug)]
pub struct InMemoryTransactionStore {
    records: Arc<[Transaction]>,
    options: Arc<FilterOptions>,
}

impl InMemoryTransactionStore {
    /// Create a store computing filter options over every record
    pub fn new(records: Vec<Transaction>) -> Self {
        Self::with_policy(records, FacetPolicy::Full)
    }

    pub fn with_policy(records: Vec<Transaction>, policy: FacetPolicy) -> Self {
        let options = compute_filter_options(&records, policy);
        Self {
            records: records.into(),
            options: Arc::new(options),
        }
    }

    /// Load a JSON array of records from disk
    pub fn from_json_file(path: impl AsRef<Path>, policy: FacetPolicy) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json_str(&content, policy)
            .map_err(|e| anyhow!("Failed to load {}: {}", path.display(), e))
    }

    pub fn from_json_str(content: &str, policy: FacetPolicy) -> Result<Self> {
        let records: Vec<Transaction> = serde_json::from_str(content)
            .map_err(|e| anyhow!("Failed to parse transactions: {}", e))?;
        Ok(Self::with_policy(records, policy))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn query(&self, query: &SalesQuery) -> Result<SalesPage> {
        Ok(pipeline::run(&self.records, query))
    }

    async fn filter_options(&self) -> Result<FilterOptions> {
        Ok(self.options.as_ref().clone())
    }
}
