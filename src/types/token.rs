//! Token Types
//!
//! Token exchange response and the cached bearer token derived from it.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Response of the client-credentials exchange at `/oauth/token`.
#[derive(Clone, Deserialize)]
pub struct TokenExchangeResponse {
    /// Access token. Empty when the server omitted it.
    #[serde(default)]
    pub access_token: String,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Whether the credentials belong to a production account.
    #[serde(default)]
    pub live_mode: bool,
    /// Numeric account id.
    #[serde(default)]
    pub user_id: i64,
    /// Token type (usually "bearer").
    #[serde(default)]
    pub token_type: String,
    /// Expires in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Granted scopes.
    #[serde(default)]
    pub scope: Option<String>,
}

impl std::fmt::Debug for TokenExchangeResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenExchangeResponse")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("live_mode", &self.live_mode)
            .field("user_id", &self.user_id)
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Bearer token held by the credential store.
#[derive(Clone)]
pub struct CachedToken {
    access_token: SecretString,
    /// When the exchange completed.
    pub acquired_at: DateTime<Utc>,
    /// Expiration time; `None` when the server did not state one.
    pub expires_at: Option<DateTime<Utc>>,
    /// Account id reported by the exchange.
    pub user_id: i64,
    /// Live-mode flag reported by the exchange.
    pub live_mode: bool,
}

impl CachedToken {
    /// Create from token response.
    pub fn from_response(response: &TokenExchangeResponse) -> Self {
        let now = Utc::now();
        // An expiry too far out to represent is treated as no expiry.
        let expires_at = response
            .expires_in
            .filter(|secs| *secs > 0)
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime));

        Self {
            access_token: SecretString::new(response.access_token.clone()),
            acquired_at: now,
            expires_at,
            user_id: response.user_id,
            live_mode: response.live_mode,
        }
    }

    /// The bearer token value.
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// Check whether the token is expired or will be within `margin`.
    pub fn is_expired(&self, margin: std::time::Duration) -> bool {
        let Some(expires_at) = self.expires_at else {
            return false;
        };
        let deadline = Duration::from_std(margin)
            .ok()
            .and_then(|margin| Utc::now().checked_add_signed(margin))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        expires_at <= deadline
    }
}

impl std::fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("access_token", &"[REDACTED]")
            .field("acquired_at", &self.acquired_at)
            .field("expires_at", &self.expires_at)
            .field("user_id", &self.user_id)
            .field("live_mode", &self.live_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(expires_in: Option<u64>) -> TokenExchangeResponse {
        TokenExchangeResponse {
            access_token: "APP_USR-token".to_string(),
            refresh_token: None,
            live_mode: false,
            user_id: 42,
            token_type: "bearer".to_string(),
            expires_in,
            scope: Some("offline_access payments".to_string()),
        }
    }

    #[test]
    fn test_exchange_response_parsing() {
        let json = r#"{
            "access_token": "APP_USR-123",
            "refresh_token": "TG-456",
            "live_mode": true,
            "user_id": 123456789,
            "token_type": "bearer",
            "expires_in": 21600,
            "scope": "offline_access read write"
        }"#;
        let parsed: TokenExchangeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "APP_USR-123");
        assert_eq!(parsed.refresh_token.as_deref(), Some("TG-456"));
        assert!(parsed.live_mode);
        assert_eq!(parsed.user_id, 123456789);
        assert_eq!(parsed.expires_in, Some(21600));
    }

    #[test]
    fn test_missing_access_token_decodes_as_empty() {
        let parsed: TokenExchangeResponse =
            serde_json::from_str(r#"{"token_type":"bearer"}"#).unwrap();
        assert!(parsed.access_token.is_empty());
    }

    #[test]
    fn test_cached_token_without_expiry_never_expires() {
        let token = CachedToken::from_response(&response(None));
        assert!(token.expires_at.is_none());
        assert!(!token.is_expired(std::time::Duration::from_secs(3600)));

        let token = CachedToken::from_response(&response(Some(0)));
        assert!(!token.is_expired(std::time::Duration::from_secs(3600)));
    }

    #[test]
    fn test_cached_token_expiry_margin() {
        let token = CachedToken::from_response(&response(Some(30)));
        assert!(!token.is_expired(std::time::Duration::ZERO));
        assert!(token.is_expired(std::time::Duration::from_secs(60)));
    }

    #[test]
    fn test_unrepresentable_expiry_is_treated_as_none() {
        for secs in [10_000_000_000_000, u64::MAX] {
            let token = CachedToken::from_response(&response(Some(secs)));
            assert!(token.expires_at.is_none());
            assert!(!token.is_expired(std::time::Duration::from_secs(60)));
        }
    }

    #[test]
    fn test_huge_margin_expires_token() {
        let token = CachedToken::from_response(&response(Some(30)));
        assert!(token.is_expired(std::time::Duration::MAX));
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = CachedToken::from_response(&response(Some(30)));
        let debug_str = format!("{:?}", token);
        assert!(!debug_str.contains("APP_USR-token"));
        assert_eq!(token.access_token(), "APP_USR-token");
    }
}
