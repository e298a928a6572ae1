//! Mercado Pago Types
//!
//! Configuration, authentication, token and resource type definitions.

pub mod auth;
pub mod common;
pub mod config;
pub mod payment;
pub mod preference;
pub mod token;

pub use auth::*;
pub use common::*;
pub use config::*;
pub use payment::*;
pub use preference::*;
pub use token::*;
