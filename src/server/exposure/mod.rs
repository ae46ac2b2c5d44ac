//! API exposure modules
//!
//! Each exposure consumes the shared handler state and produces a Router for
//! its protocol.

pub mod rest;

pub use rest::RestExposure;
