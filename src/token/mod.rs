//! Token Management
//!
//! Bearer token caching and per-request credential resolution.

pub mod credentials;

pub use credentials::{CredentialStore, CredentialStoreConfig};
