//! Configuration Types
//!
//! Client configuration for the Mercado Pago API.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Fixed origin of the Mercado Pago API.
pub const API_BASE_URL: &str = "https://api.mercadopago.com";

/// SDK version reported in the `User-Agent` header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default margin before a cached token's stated expiry at which it is re-acquired.
pub const DEFAULT_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// `User-Agent` header value sent with every request.
pub fn user_agent() -> String {
    format!("MercadoPago Rust SDK v{}", SDK_VERSION)
}

/// Client configuration.
#[derive(Clone)]
pub struct MercadoPagoConfig {
    /// Client credentials used for the token exchange.
    pub credentials: ClientCredentials,
    /// Caller-supplied access token used by static-token operations.
    pub static_access_token: Option<SecretString>,
    /// Origin every resource path is resolved against.
    pub base_url: Url,
    /// Dump every request and response to the diagnostic sink.
    pub debug: bool,
    /// Re-acquire the cached token once it is this close to expiring.
    pub expiry_margin: Duration,
    /// Honour `expires_in` from the token exchange. When false the first token
    /// is kept until explicitly invalidated.
    pub track_token_expiry: bool,
}

impl MercadoPagoConfig {
    /// Whether this configuration targets the sandbox checkout.
    pub fn is_sandbox(&self) -> bool {
        self.credentials.sandbox
    }
}

impl std::fmt::Debug for MercadoPagoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MercadoPagoConfig")
            .field("credentials", &self.credentials)
            .field(
                "static_access_token",
                &self.static_access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("base_url", &self.base_url.as_str())
            .field("debug", &self.debug)
            .field("expiry_margin", &self.expiry_margin)
            .field("track_token_expiry", &self.track_token_expiry)
            .finish()
    }
}

/// Client credentials for the client-credentials grant.
#[derive(Clone)]
pub struct ClientCredentials {
    /// Client identifier.
    pub client_id: String,
    /// Client secret. Never serialized or printed.
    pub(crate) client_secret: SecretString,
    /// Sandbox mode.
    pub sandbox: bool,
}

impl ClientCredentials {
    /// Create credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>, sandbox: bool) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
            sandbox,
        }
    }

    pub(crate) fn client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("sandbox", &self.sandbox)
            .finish()
    }
}
