//! Core module containing the record model, query stages and store trait

pub mod error;
pub mod filter;
pub mod options;
pub mod pipeline;
pub mod query;
pub mod sort;
pub mod store;
pub mod summary;
pub mod transaction;

pub use error::SalesError;
pub use filter::FilterSet;
pub use options::{FacetPolicy, FilterOptions};
pub use pipeline::SalesService;
pub use query::{PageSpec, PaginatedResponse, PaginationMeta, QueryParams, SalesQuery};
pub use sort::{SortKey, SortOrder, SortSpec};
pub use store::{SalesPage, TransactionStore};
pub use summary::SalesSummary;
pub use transaction::Transaction;
