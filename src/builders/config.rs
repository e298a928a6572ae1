//! Configuration Builder
//!
//! Fluent builder for Mercado Pago client configuration.

use secrecy::SecretString;
use std::time::Duration;
use url::Url;

use crate::error::{ConfigurationError, MercadoPagoError};
use crate::types::{ClientCredentials, MercadoPagoConfig, API_BASE_URL, DEFAULT_EXPIRY_MARGIN};

/// Environment variable holding the client id.
pub const ENV_CLIENT_ID: &str = "MP_CLIENT_ID";
/// Environment variable holding the client secret.
pub const ENV_CLIENT_SECRET: &str = "MP_CLIENT_SECRET";
/// Environment variable holding the static access token.
pub const ENV_ACCESS_TOKEN: &str = "MP_ACCESS_TOKEN";
/// Environment variable enabling sandbox mode.
pub const ENV_SANDBOX: &str = "MP_SANDBOX";
/// Environment variable enabling wire dumps.
pub const ENV_DEBUG: &str = "MP_DEBUG";
/// Environment variable overriding the API origin.
pub const ENV_BASE_URL: &str = "MP_BASE_URL";

/// Mercado Pago configuration builder.
#[derive(Default)]
pub struct MercadoPagoConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    access_token: Option<SecretString>,
    sandbox: bool,
    debug: bool,
    base_url: Option<String>,
    expiry_margin: Option<Duration>,
    track_token_expiry: Option<bool>,
}

impl MercadoPagoConfigBuilder {
    /// Create new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-filled from `MP_*` environment variables.
    pub fn from_env() -> Result<Self, MercadoPagoError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builder pre-filled from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MercadoPagoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::new();

        if let Some(client_id) = lookup(ENV_CLIENT_ID) {
            builder = builder.client_id(client_id);
        }
        if let Some(client_secret) = lookup(ENV_CLIENT_SECRET) {
            builder = builder.client_secret(client_secret);
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|t| !t.is_empty()) {
            builder = builder.access_token(token);
        }
        if let Some(value) = lookup(ENV_SANDBOX) {
            builder = builder.sandbox(parse_flag(ENV_SANDBOX, &value)?);
        }
        if let Some(value) = lookup(ENV_DEBUG) {
            builder = builder.debug(parse_flag(ENV_DEBUG, &value)?);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|u| !u.is_empty()) {
            builder = builder.base_url(base_url);
        }

        Ok(builder)
    }

    /// Set client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(SecretString::new(client_secret.into()));
        self
    }

    /// Set the static access token used by payment operations.
    pub fn access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(SecretString::new(access_token.into()));
        self
    }

    /// Enable or disable sandbox mode.
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Enable or disable wire dumps.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the API origin.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set how long before its stated expiry a token is re-acquired.
    pub fn expiry_margin(mut self, margin: Duration) -> Self {
        self.expiry_margin = Some(margin);
        self
    }

    /// Enable or disable honouring `expires_in` from the token exchange.
    pub fn track_token_expiry(mut self, track: bool) -> Self {
        self.track_token_expiry = Some(track);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<MercadoPagoConfig, MercadoPagoError> {
        let client_id = self
            .client_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| missing("client_id"))?;

        let client_secret = self
            .client_secret
            .ok_or_else(|| missing("client_secret"))?;

        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(API_BASE_URL))?;

        Ok(MercadoPagoConfig {
            credentials: ClientCredentials {
                client_id,
                client_secret,
                sandbox: self.sandbox,
            },
            static_access_token: self.access_token,
            base_url,
            debug: self.debug,
            expiry_margin: self.expiry_margin.unwrap_or(DEFAULT_EXPIRY_MARGIN),
            track_token_expiry: self.track_token_expiry.unwrap_or(true),
        })
    }
}

fn missing(field: &str) -> MercadoPagoError {
    MercadoPagoError::Configuration(ConfigurationError::MissingField {
        field: field.to_string(),
    })
}

fn parse_base_url(raw: &str) -> Result<Url, MercadoPagoError> {
    let invalid = |message: String| {
        MercadoPagoError::Configuration(ConfigurationError::InvalidBaseUrl {
            url: raw.to_string(),
            message,
        })
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("URL has no host".to_string()));
    }
    Ok(url)
}

fn parse_flag(field: &str, value: &str) -> Result<bool, MercadoPagoError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(MercadoPagoError::Configuration(
            ConfigurationError::InvalidValue {
                field: field.to_string(),
                message: format!("expected a boolean, got {:?}", other),
            },
        )),
    }
}

/// Create a new Mercado Pago configuration builder.
pub fn mercadopago_config() -> MercadoPagoConfigBuilder {
    MercadoPagoConfigBuilder::new()
}

impl MercadoPagoConfig {
    /// Load configuration from `MP_*` environment variables.
    pub fn from_env() -> Result<Self, MercadoPagoError> {
        MercadoPagoConfigBuilder::from_env()?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    #[test]
    fn test_builder_success() {
        let config = mercadopago_config()
            .client_id("test-client")
            .client_secret("test-secret")
            .sandbox(true)
            .build()
            .unwrap();

        assert_eq!(config.credentials.client_id, "test-client");
        assert!(config.is_sandbox());
        assert!(!config.debug);
        assert_eq!(config.base_url.as_str(), "https://api.mercadopago.com/");
        assert_eq!(config.expiry_margin, DEFAULT_EXPIRY_MARGIN);
        assert!(config.track_token_expiry);
        assert!(config.static_access_token.is_none());
    }

    #[test]
    fn test_builder_missing_client_id() {
        let result = mercadopago_config().client_secret("test-secret").build();
        assert!(matches!(
            result,
            Err(MercadoPagoError::Configuration(ConfigurationError::MissingField { ref field })) if field == "client_id"
        ));
    }

    #[test]
    fn test_builder_missing_secret() {
        let result = mercadopago_config().client_id("test-client").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_malformed_base_url() {
        for raw in ["not a url", "mailto:someone@example.com", "ftp://example.com"] {
            let result = mercadopago_config()
                .client_id("id")
                .client_secret("secret")
                .base_url(raw)
                .build();
            assert!(
                matches!(
                    result,
                    Err(MercadoPagoError::Configuration(ConfigurationError::InvalidBaseUrl { .. }))
                ),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_CLIENT_ID, "env-client"),
            (ENV_CLIENT_SECRET, "env-secret"),
            (ENV_ACCESS_TOKEN, "APP_USR-static"),
            (ENV_SANDBOX, "true"),
            (ENV_DEBUG, "0"),
            (ENV_BASE_URL, "http://127.0.0.1:8080"),
        ]
        .into_iter()
        .collect();

        let config = MercadoPagoConfigBuilder::from_lookup(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.credentials.client_id, "env-client");
        assert_eq!(
            config
                .static_access_token
                .as_ref()
                .map(|t| t.expose_secret().as_str()),
            Some("APP_USR-static")
        );
        assert!(config.is_sandbox());
        assert!(!config.debug);
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_from_lookup_invalid_flag() {
        let result = MercadoPagoConfigBuilder::from_lookup(|k| {
            (k == ENV_DEBUG).then(|| "maybe".to_string())
        });
        assert!(matches!(
            result,
            Err(MercadoPagoError::Configuration(ConfigurationError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let config = mercadopago_config()
            .client_id("test-client")
            .client_secret("super-secret")
            .access_token("APP_USR-static")
            .build()
            .unwrap();
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("super-secret"));
        assert!(!debug_str.contains("APP_USR-static"));
    }
}
