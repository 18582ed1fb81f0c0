//! HTTP route handlers, one module per resource.

pub mod cargos;
pub mod handling;
pub mod health;
pub mod metrics;
pub mod network;
