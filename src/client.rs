//! Mercado Pago Client
//!
//! High-level client combining token management and the resource services.

use std::sync::Arc;

use crate::core::{HttpTransport, ReqwestHttpTransport, RequestBuilder, RestClient};
use crate::error::{MercadoPagoError, MercadoPagoResult};
use crate::flows::{ClientCredentialsFlow, ClientCredentialsFlowImpl};
use crate::services::{PaymentsService, PreferencesService};
use crate::telemetry::{DiagnosticSink, DiagnosticTransport, TracingDiagnosticSink};
use crate::token::{CredentialStore, CredentialStoreConfig};
use crate::types::{CachedToken, MercadoPagoConfig, Preference};

/// Mercado Pago API client.
///
/// Cheap to share: wrap it in an `Arc` or clone the services it hands out.
pub struct MercadoPagoClient {
    config: MercadoPagoConfig,
    credentials: Arc<CredentialStore>,
    preferences: PreferencesService,
    payments: PaymentsService,
}

impl MercadoPagoClient {
    /// Create a client with the default transport.
    pub fn new(config: MercadoPagoConfig) -> MercadoPagoResult<Self> {
        MercadoPagoClientBuilder::new(config).build()
    }

    /// Create a client configured from `MP_*` environment variables.
    pub fn from_env() -> MercadoPagoResult<Self> {
        Self::new(MercadoPagoConfig::from_env()?)
    }

    /// Start building a client with custom components.
    pub fn builder(config: MercadoPagoConfig) -> MercadoPagoClientBuilder {
        MercadoPagoClientBuilder::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &MercadoPagoConfig {
        &self.config
    }

    /// Checkout preferences.
    pub fn preferences(&self) -> &PreferencesService {
        &self.preferences
    }

    /// Payments.
    pub fn payments(&self) -> &PaymentsService {
        &self.payments
    }

    /// Return the cached access token, exchanging credentials on first use.
    pub async fn access_token(&self) -> MercadoPagoResult<String> {
        Ok(self.credentials.ensure_token().await?)
    }

    /// Drop the cached access token; the next authenticated call exchanges
    /// credentials again.
    pub async fn invalidate_access_token(&self) {
        self.credentials.invalidate().await;
    }

    /// Snapshot of the cached token, if any.
    pub async fn cached_token(&self) -> Option<CachedToken> {
        self.credentials.cached_token().await
    }

    /// Checkout URL of `preference` for the configured environment.
    pub fn checkout_url<'a>(&self, preference: &'a Preference) -> Option<&'a str> {
        preference.checkout_url(self.config.is_sandbox())
    }
}

impl std::fmt::Debug for MercadoPagoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MercadoPagoClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`MercadoPagoClient`].
pub struct MercadoPagoClientBuilder {
    config: MercadoPagoConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    diagnostic_sink: Option<Arc<dyn DiagnosticSink>>,
    token_flow: Option<Arc<dyn ClientCredentialsFlow>>,
}

impl MercadoPagoClientBuilder {
    pub fn new(config: MercadoPagoConfig) -> Self {
        Self {
            config,
            transport: None,
            diagnostic_sink: None,
            token_flow: None,
        }
    }

    /// Sets a custom HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Dump every request and response to `sink`. Enables debug mode.
    pub fn diagnostic_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostic_sink = Some(sink);
        self
    }

    /// Sets a custom token provider.
    pub fn token_flow(mut self, flow: Arc<dyn ClientCredentialsFlow>) -> Self {
        self.token_flow = Some(flow);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<MercadoPagoClient, MercadoPagoError> {
        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestHttpTransport::new()?),
        };

        let sink = match self.diagnostic_sink {
            Some(sink) => Some(sink),
            None if self.config.debug => {
                Some(Arc::new(TracingDiagnosticSink) as Arc<dyn DiagnosticSink>)
            }
            None => None,
        };
        let transport: Arc<dyn HttpTransport> = match sink {
            Some(sink) => Arc::new(DiagnosticTransport::new(transport, sink)),
            None => transport,
        };

        let builder = RequestBuilder::new(self.config.base_url.clone());

        let token_flow = self.token_flow.unwrap_or_else(|| {
            Arc::new(ClientCredentialsFlowImpl::new(
                builder.clone(),
                transport.clone(),
            )) as Arc<dyn ClientCredentialsFlow>
        });

        let credentials = Arc::new(CredentialStore::new(
            self.config.credentials.clone(),
            self.config.static_access_token.clone(),
            CredentialStoreConfig {
                expiry_margin: self.config.expiry_margin,
                track_expiry: self.config.track_token_expiry,
            },
            token_flow,
        ));

        let rest = RestClient::new(builder, transport, credentials.clone());

        tracing::debug!(
            base_url = %self.config.base_url,
            sandbox = self.config.is_sandbox(),
            debug = self.config.debug,
            "mercado pago client created"
        );

        Ok(MercadoPagoClient {
            preferences: PreferencesService::new(rest.clone()),
            payments: PaymentsService::new(rest),
            credentials,
            config: self.config,
        })
    }
}

/// Create a client with the default transport.
pub fn mercadopago_client(config: MercadoPagoConfig) -> MercadoPagoResult<MercadoPagoClient> {
    MercadoPagoClient::new(config)
}
