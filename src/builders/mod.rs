//! Builders
//!
//! Fluent builder for client configuration.

pub mod config;

pub use config::{mercadopago_config, MercadoPagoConfigBuilder};
