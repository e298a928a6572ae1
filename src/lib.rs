//! Mercado Pago Client
//!
//! Client for the Mercado Pago checkout preferences and payments API.
//!
//! # Features
//!
//! - OAuth2 client-credentials token exchange with a shared token cache
//! - Checkout preferences: create, get, update
//! - Payments: create, get, search
//! - Form and JSON request encodings with the token attached accordingly
//! - Optional wire dumps of every request and response
//!
//! # Example
//!
//! ```rust,ignore
//! use mercadopago_client::{mercadopago_config, Item, MercadoPagoClient, Preference};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = mercadopago_config()
//!         .client_id("my-client-id")
//!         .client_secret("my-client-secret")
//!         .sandbox(true)
//!         .build()?;
//!
//!     let client = MercadoPagoClient::new(config)?;
//!
//!     let preference = Preference::with_reference("order-42")
//!         .item(Item::new("sku-1", "T-shirt", 1, "ARS", 10.2));
//!     let created = client.preferences().create(&preference).await?;
//!
//!     println!("Checkout at {:?}", client.checkout_url(&created));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: configuration, auth modes, tokens and resource records
//! - `error`: error hierarchy
//! - `core`: HTTP transport, request builder and call orchestration
//! - `flows`: client-credentials token exchange
//! - `token`: token cache and credential resolution
//! - `telemetry`: wire dumps
//! - `services`: preferences and payments
//! - `builders`: fluent configuration builder
//! - `client`: high-level client combining all of the above

pub mod builders;
pub mod client;
pub mod core;
pub mod error;
pub mod flows;
pub mod services;
pub mod telemetry;
pub mod token;
pub mod types;

// Re-export main client
pub use client::{mercadopago_client, MercadoPagoClient, MercadoPagoClientBuilder};

// Re-export builders
pub use builders::{mercadopago_config, MercadoPagoConfigBuilder};

// Re-export errors
pub use error::{
    ApiErrorBody, ApiStatusError, AuthenticationError, ConfigurationError, DecodeError,
    MercadoPagoError, MercadoPagoResult, NetworkError,
};

// Re-export types
pub use types::{
    // Config
    user_agent, ClientCredentials, MercadoPagoConfig, API_BASE_URL, SDK_VERSION,
    // Auth and token
    AuthMode, CachedToken, TokenExchangeResponse,
    // Common
    Address, FlexibleId, Identification, Item, Phone,
    // Preference
    BackUrls, FreeMethod, PayerAddress, PaymentMethodRef, PaymentMethods, Preference,
    PreferencePayer, Shipments,
    // Payment
    AdditionalInfo, AdditionalInfoPayer, AdditionalInfoShipments, Barcode, Card, Cardholder,
    FeeDetail, Order, Paging, Payment, PaymentPayer, PaymentSearch, Refund, RefundSource,
    TransactionDetails,
};

// Re-export core components
pub use core::{
    Encoding, FormParams, HttpMethod, HttpRequest, HttpResponse, HttpTransport,
    MockHttpTransport, RequestBody, RequestBuilder, ReqwestHttpTransport, RestClient,
};

// Re-export flows
pub use flows::{ClientCredentialsFlow, ClientCredentialsFlowImpl, MockClientCredentialsFlow};

// Re-export token management
pub use token::{CredentialStore, CredentialStoreConfig};

// Re-export services
pub use services::{PaymentsService, PreferencesService};

// Re-export telemetry
pub use telemetry::{
    DiagnosticSink, DiagnosticTransport, InMemoryDiagnosticSink, TracingDiagnosticSink,
    WriterDiagnosticSink,
};
