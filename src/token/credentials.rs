//! Credential Store
//!
//! Holds the cached bearer token and resolves an [`AuthMode`] into the
//! credential attached to a request.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::error::AuthenticationError;
use crate::flows::ClientCredentialsFlow;
use crate::types::{AuthMode, CachedToken, ClientCredentials, DEFAULT_EXPIRY_MARGIN};

/// Credential store configuration.
#[derive(Debug, Clone)]
pub struct CredentialStoreConfig {
    /// Re-acquire the token once it is this close to its stated expiry.
    pub expiry_margin: Duration,
    /// Honour the stated expiry at all. When false the first token is kept
    /// until [`CredentialStore::invalidate`] is called.
    pub track_expiry: bool,
}

impl Default for CredentialStoreConfig {
    fn default() -> Self {
        Self {
            expiry_margin: DEFAULT_EXPIRY_MARGIN,
            track_expiry: true,
        }
    }
}

/// Owner of the client credentials, the optional static token and the
/// cached bearer token.
pub struct CredentialStore {
    credentials: ClientCredentials,
    static_token: Option<SecretString>,
    config: CredentialStoreConfig,
    flow: Arc<dyn ClientCredentialsFlow>,
    // Held across the exchange so concurrent callers on an empty cache wait
    // for a single exchange.
    cache: Mutex<Option<CachedToken>>,
}

impl CredentialStore {
    /// Create new credential store with an empty cache.
    pub fn new(
        credentials: ClientCredentials,
        static_token: Option<SecretString>,
        config: CredentialStoreConfig,
        flow: Arc<dyn ClientCredentialsFlow>,
    ) -> Self {
        Self {
            credentials,
            static_token,
            config,
            flow,
            cache: Mutex::new(None),
        }
    }

    /// Return the cached token, exchanging credentials first when the cache
    /// is empty or the token is expired.
    ///
    /// On failure the cache is left empty and the next call tries again.
    pub async fn ensure_token(&self) -> Result<String, AuthenticationError> {
        let mut cache = self.cache.lock().await;

        if let Some(token) = cache.as_ref() {
            if !self.config.track_expiry || !token.is_expired(self.config.expiry_margin) {
                return Ok(token.access_token().to_string());
            }
            tracing::debug!(expires_at = ?token.expires_at, "cached access token expired");
            *cache = None;
        }

        let response = self.flow.request_token(&self.credentials).await?;
        if response.access_token.is_empty() {
            tracing::warn!(client_id = %self.credentials.client_id, "token exchange returned an empty access token");
            return Err(AuthenticationError::EmptyToken);
        }

        let token = CachedToken::from_response(&response);
        tracing::debug!(
            user_id = token.user_id,
            live_mode = token.live_mode,
            expires_at = ?token.expires_at,
            "access token acquired"
        );
        let value = token.access_token().to_string();
        *cache = Some(token);
        Ok(value)
    }

    /// Clear the cache so the next [`CredentialStore::ensure_token`] performs
    /// a new exchange.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    /// Snapshot of the cached token without triggering an exchange.
    pub async fn cached_token(&self) -> Option<CachedToken> {
        self.cache.lock().await.clone()
    }

    /// Credential to attach for `auth`, if any.
    pub async fn resolve(&self, auth: AuthMode) -> Result<Option<String>, AuthenticationError> {
        match auth {
            AuthMode::None => Ok(None),
            AuthMode::CachedBearer => self.ensure_token().await.map(Some),
            AuthMode::StaticProvided => self
                .static_token
                .as_ref()
                .map(|t| Some(t.expose_secret().to_string()))
                .ok_or(AuthenticationError::MissingStaticToken),
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("credentials", &self.credentials)
            .field(
                "static_token",
                &self.static_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
