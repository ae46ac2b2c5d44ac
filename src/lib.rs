//! # Sales-RS
//!
//! Search, filter, sort and paginate retail sales records, served from an
//! in-memory record set, MySQL or MongoDB with identical results.
//!
//! ## Features
//!
//! - **Fixed pipeline**: search → filter → sort → paginate, in that order
//! - **Interchangeable stores**: one [`TransactionStore`](core::TransactionStore)
//!   trait, selected once from configuration
//! - **Deterministic order**: sort ties resolve to ingestion order on every backend
//! - **Filter options**: distinct values and ranges for building filter controls
//! - **Summary totals**: units, amount and discount over every matching record
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sales::prelude::*;
//!
//! let store = InMemoryTransactionStore::from_json_file("sales.json", FacetPolicy::Full)?;
//! let service = SalesService::new(store);
//!
//! let query = QueryParams::from_pairs(vec![
//!     ("regions".to_string(), "North".to_string()),
//!     ("sortBy".to_string(), "quantity".to_string()),
//! ])
//! .into_query();
//!
//! let page = service.list(&query).await?;
//! println!("{} of {}", page.data.len(), page.pagination.total_items);
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        FacetPolicy, FilterOptions, FilterSet, PageSpec, PaginationMeta, QueryParams,
        SalesError, SalesPage, SalesQuery, SalesService, SalesSummary, SortKey, SortOrder,
        SortSpec, Transaction, TransactionStore,
    };

    // === Storage ===
    pub use crate::storage::InMemoryTransactionStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoTransactionStore;
    #[cfg(feature = "mysql")]
    pub use crate::storage::MysqlTransactionStore;

    // === Config ===
    pub use crate::config::{AppConfig, StoreConfig};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
