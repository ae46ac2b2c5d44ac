//! Server module for building the sales HTTP API
//!
//! `ServerBuilder` wires a [`SalesService`](crate::core::pipeline::SalesService)
//! into the REST exposure:
//! - `GET /api/sales` and `GET /api/sales/filters`
//! - health routes

pub mod builder;
pub mod exposure;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
