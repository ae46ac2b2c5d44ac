//! Configuration loading and management
//!
//! Settings come from an optional YAML file, then environment variables
//! override individual values:
//!
//! | Variable                  | Setting                                  |
//! |---------------------------|------------------------------------------|
//! | `HOST`, `PORT`            | `server.host`, `server.port`             |
//! | `SALES_BACKEND`           | `store.backend` (`memory`, `mysql`, `mongodb`) |
//! | `USE_DB=true`             | same as `SALES_BACKEND=mysql`            |
//! | `SALES_DATA_PATH`         | memory `data_path`                       |
//! | `DATABASE_URL`            | mysql `url`                              |
//! | `MYSQL_HOST`, `MYSQL_PORT`, `MYSQL_USER`, `MYSQL_PASSWORD`, `MYSQL_DATABASE` | mysql parts, used when no `url` is set |
//! | `MONGODB_URI`, `MONGODB_DATABASE` | mongodb `uri`, `database`        |
//! | `SALES_FACET_SAMPLE_SIZE` | `facets.sample_size`                     |
//! | `SALES_PAGE_SIZE`         | `pagination.default_page_size`           |

use crate::core::error::SalesError;
use crate::core::options::FacetPolicy;
use crate::core::query::DEFAULT_PAGE_SIZE;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub facets: FacetConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

/// Which store answers queries, and how to reach it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Resident record set, optionally loaded from a JSON array file
    Memory {
        #[serde(default)]
        data_path: Option<PathBuf>,
    },
    Mysql(MysqlConfig),
    Mongodb(MongoConfig),
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Memory { data_path: None }
    }
}

impl StoreConfig {
    /// Backend name as accepted by `SALES_BACKEND`
    pub fn backend(&self) -> &'static str {
        match self {
            StoreConfig::Memory { .. } => "memory",
            StoreConfig::Mysql(_) => "mysql",
            StoreConfig::Mongodb(_) => "mongodb",
        }
    }

    fn for_backend(name: &str) -> Result<Self, SalesError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "in_memory" => Ok(StoreConfig::default()),
            "mysql" => Ok(StoreConfig::Mysql(MysqlConfig::default())),
            "mongodb" | "mongo" => Ok(StoreConfig::Mongodb(MongoConfig::default())),
            other => Err(SalesError::Config(format!("unknown backend '{}'", other))),
        }
    }
}

/// MySQL connection settings
///
/// A `url` takes precedence; otherwise the connection is built from the
/// individual parts, which are passed to the driver as-is (no URL escaping).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MysqlConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
    pub max_connections: u32,
}

impl Default for MysqlConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: None,
            database: "sales".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "sales".to_string(),
        }
    }
}

/// Filter-options computation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetConfig {
    /// Compute options from the first `n` records only; absent means all
    pub sample_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, SalesError> {
    value
        .trim()
        .parse()
        .map_err(|_| SalesError::Config(format!("invalid {}: '{}'", name, value)))
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply environment overrides from the process environment
    pub fn with_process_env(self) -> Result<Self, SalesError> {
        self.with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Apply environment overrides through `lookup`
    ///
    /// Empty values count as unset. Selecting a different backend replaces
    /// the store section with that backend's defaults before its own
    /// variables are applied.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, SalesError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(host) = var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("PORT") {
            self.server.port = parse_env("PORT", &port)?;
        }

        let backend = var("SALES_BACKEND").or_else(|| {
            var("USE_DB")
                .filter(|v| v.eq_ignore_ascii_case("true"))
                .map(|_| "mysql".to_string())
        });
        if let Some(backend) = backend {
            let selected = StoreConfig::for_backend(&backend)?;
            if selected.backend() != self.store.backend() {
                self.store = selected;
            }
        }

        match &mut self.store {
            StoreConfig::Memory { data_path } => {
                if let Some(path) = var("SALES_DATA_PATH") {
                    *data_path = Some(PathBuf::from(path));
                }
            }
            StoreConfig::Mysql(mysql) => {
                if let Some(url) = var("DATABASE_URL") {
                    mysql.url = Some(url);
                }
                if let Some(host) = var("MYSQL_HOST") {
                    mysql.host = host;
                }
                if let Some(port) = var("MYSQL_PORT") {
                    mysql.port = parse_env("MYSQL_PORT", &port)?;
                }
                if let Some(user) = var("MYSQL_USER") {
                    mysql.user = user;
                }
                if let Some(password) = var("MYSQL_PASSWORD") {
                    mysql.password = Some(password);
                }
                if let Some(database) = var("MYSQL_DATABASE") {
                    mysql.database = database;
                }
            }
            StoreConfig::Mongodb(mongo) => {
                if let Some(uri) = var("MONGODB_URI") {
                    mongo.uri = uri;
                }
                if let Some(database) = var("MONGODB_DATABASE") {
                    mongo.database = database;
                }
            }
        }

        if let Some(size) = var("SALES_FACET_SAMPLE_SIZE") {
            self.facets.sample_size = Some(parse_env("SALES_FACET_SAMPLE_SIZE", &size)?);
        }
        if let Some(size) = var("SALES_PAGE_SIZE") {
            self.pagination.default_page_size = parse_env("SALES_PAGE_SIZE", &size)?;
        }

        Ok(self)
    }

    pub fn facet_policy(&self) -> FacetPolicy {
        FacetPolicy::from_sample_size(self.facets.sample_size)
    }

    /// `host:port` to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
