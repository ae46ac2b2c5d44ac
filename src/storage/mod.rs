//! Storage implementations for different backends

pub mod in_memory;

#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

#[cfg(feature = "mysql")]
pub mod mysql;

pub use in_memory::InMemoryTransactionStore;

#[cfg(feature = "mongodb_backend")]
pub use self::mongodb::MongoTransactionStore;

#[cfg(feature = "mysql")]
pub use mysql::MysqlTransactionStore;

use crate::config::StoreConfig;
use crate::core::error::SalesError;
use crate::core::options::FacetPolicy;
use crate::core::store::TransactionStore;
use std::sync::Arc;

/// Build the store described by `config`
///
/// This is the only place a backend is chosen. Database schemas and indexes
/// are ensured before the store is returned.
pub async fn connect(
    config: &StoreConfig,
    policy: FacetPolicy,
) -> Result<Arc<dyn TransactionStore>, SalesError> {
    match config {
        StoreConfig::Memory { data_path } => {
            let store = match data_path {
                Some(path) => InMemoryTransactionStore::from_json_file(path, policy)
                    .map_err(|e| SalesError::Load(format!("{:#}", e)))?,
                None => {
                    tracing::warn!("No data path configured, serving an empty record set");
                    InMemoryTransactionStore::with_policy(Vec::new(), policy)
                }
            };
            tracing::info!(records = store.len(), "In-memory store ready");
            Ok(Arc::new(store))
        }

        #[cfg(feature = "mysql")]
        StoreConfig::Mysql(mysql_config) => {
            let options = mysql::connect_options(mysql_config)
                .map_err(|e| SalesError::Config(e.to_string()))?;
            let pool = sqlx::mysql::MySqlPoolOptions::new()
                .max_connections(mysql_config.max_connections)
                .connect_with(options)
                .await
                .map_err(|e| SalesError::storage("mysql", e))?;
            mysql::ensure_schema(&pool)
                .await
                .map_err(|e| SalesError::storage("mysql", e))?;
            tracing::info!("MySQL store ready");
            Ok(Arc::new(MysqlTransactionStore::new(pool, policy)))
        }

        #[cfg(feature = "mongodb_backend")]
        StoreConfig::Mongodb(mongo_config) => {
            let client = ::mongodb::Client::with_uri_str(&mongo_config.uri)
                .await
                .map_err(|e| SalesError::storage("mongodb", e))?;
            let store =
                MongoTransactionStore::new(client.database(&mongo_config.database), policy);
            store
                .ensure_indexes()
                .await
                .map_err(|e| SalesError::storage("mongodb", e))?;
            tracing::info!(database = %mongo_config.database, "MongoDB store ready");
            Ok(Arc::new(store))
        }

        #[allow(unreachable_patterns)]
        other => Err(SalesError::Config(format!(
            "backend '{}' is not compiled in (enable its cargo feature)",
            other.backend()
        ))),
    }
}
