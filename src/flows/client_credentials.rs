//! Client Credentials Flow
//!
//! Exchanges the client id and secret for a bearer token at `/oauth/token`.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crate::core::{FormParams, HttpMethod, HttpTransport, RequestBody, RequestBuilder};
use crate::error::AuthenticationError;
use crate::types::{ClientCredentials, TokenExchangeResponse};

/// Resource path of the token endpoint.
pub const TOKEN_PATH: &str = "/oauth/token";

/// Statuses accepted from the token endpoint.
const ACCEPTED_STATUSES: &[u16] = &[200, 201];

/// Token provider interface.
#[async_trait]
pub trait ClientCredentialsFlow: Send + Sync {
    /// Exchange credentials for a token. Never retries.
    async fn request_token(
        &self,
        credentials: &ClientCredentials,
    ) -> Result<TokenExchangeResponse, AuthenticationError>;
}

/// Client Credentials Flow implementation.
pub struct ClientCredentialsFlowImpl<T: HttpTransport + ?Sized = dyn HttpTransport> {
    builder: RequestBuilder,
    transport: Arc<T>,
}

impl<T: HttpTransport + ?Sized> ClientCredentialsFlowImpl<T> {
    /// Create new Client Credentials Flow.
    pub fn new(builder: RequestBuilder, transport: Arc<T>) -> Self {
        Self { builder, transport }
    }

    fn build_request_body(credentials: &ClientCredentials) -> RequestBody {
        RequestBody::Form(
            FormParams::new()
                .with("client_id", credentials.client_id.as_str())
                .with("client_secret", credentials.client_secret())
                .with("grant_type", "client_credentials"),
        )
    }
}

#[async_trait]
impl<T: HttpTransport + ?Sized> ClientCredentialsFlow for ClientCredentialsFlowImpl<T> {
    async fn request_token(
        &self,
        credentials: &ClientCredentials,
    ) -> Result<TokenExchangeResponse, AuthenticationError> {
        tracing::debug!(client_id = %credentials.client_id, "requesting access token");

        let request = self.builder.build(
            HttpMethod::Post,
            TOKEN_PATH,
            Self::build_request_body(credentials),
            None,
        );

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|source| AuthenticationError::Unreachable { source })?;

        if !ACCEPTED_STATUSES.contains(&response.status) {
            return Err(AuthenticationError::ExchangeRejected {
                status: response.status,
                status_line: response.status_line(),
            });
        }

        serde_json::from_str(&response.body).map_err(|e| AuthenticationError::InvalidResponse {
            message: e.to_string(),
        })
    }
}

/// Mock Client Credentials Flow for testing.
#[derive(Default)]
pub struct MockClientCredentialsFlow {
    request_history: std::sync::Mutex<Vec<String>>,
    replies: std::sync::Mutex<VecDeque<Result<TokenExchangeResponse, AuthenticationError>>>,
    latency: Option<Duration>,
}

impl MockClientCredentialsFlow {
    /// Create new mock flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue a successful exchange returning `access_token`.
    pub fn queue_token(&self, access_token: &str, expires_in: Option<u64>) -> &Self {
        self.queue_response(mock_token_response(access_token, expires_in))
    }

    /// Queue a full exchange response.
    pub fn queue_response(&self, response: TokenExchangeResponse) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: AuthenticationError) -> &Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Number of exchanges performed.
    pub fn call_count(&self) -> usize {
        self.request_history.lock().unwrap().len()
    }

    /// Client ids of every exchange, in order.
    pub fn get_requests(&self) -> Vec<String> {
        self.request_history.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClientCredentialsFlow for MockClientCredentialsFlow {
    async fn request_token(
        &self,
        credentials: &ClientCredentials,
    ) -> Result<TokenExchangeResponse, AuthenticationError> {
        self.request_history
            .lock()
            .unwrap()
            .push(credentials.client_id.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Ok(mock_token_response("mock-access-token", None)))
    }
}

/// Exchange response with the given token and no refresh token.
pub fn mock_token_response(access_token: &str, expires_in: Option<u64>) -> TokenExchangeResponse {
    TokenExchangeResponse {
        access_token: access_token.to_string(),
        refresh_token: None,
        live_mode: false,
        user_id: 0,
        token_type: "bearer".to_string(),
        expires_in,
        scope: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MockHttpTransport;
    use crate::error::NetworkError;
    use url::Url;

    fn flow(transport: Arc<MockHttpTransport>) -> ClientCredentialsFlowImpl<MockHttpTransport> {
        let builder = RequestBuilder::new(Url::parse(crate::types::API_BASE_URL).unwrap());
        ClientCredentialsFlowImpl::new(builder, transport)
    }

    fn credentials() -> ClientCredentials {
        ClientCredentials::new("CLIENT_ID", "CLIENT_SECRET", true)
    }

    #[tokio::test]
    async fn test_exchange_sends_form_post_without_token() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_json_response(
            200,
            &serde_json::json!({
                "access_token": "APP_USR-1",
                "token_type": "bearer",
                "user_id": 7,
                "expires_in": 21600
            }),
        );

        let response = flow(transport.clone())
            .request_token(&credentials())
            .await
            .unwrap();
        assert_eq!(response.access_token, "APP_USR-1");
        assert_eq!(response.expires_in, Some(21600));

        let request = transport.get_last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://api.mercadopago.com/oauth/token");
        assert_eq!(
            request.body.as_deref(),
            Some("client_id=CLIENT_ID&client_secret=CLIENT_SECRET&grant_type=client_credentials")
        );
        assert_eq!(
            request.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert!(!request.url.contains("access_token"));
    }

    #[tokio::test]
    async fn test_exchange_accepts_created() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_json_response(201, &serde_json::json!({"access_token": "A"}));

        let response = flow(transport).request_token(&credentials()).await.unwrap();
        assert_eq!(response.access_token, "A");
    }

    #[tokio::test]
    async fn test_exchange_rejected_status() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_json_response(
            401,
            &serde_json::json!({"message": "invalid client_id", "status": 401}),
        );

        let err = flow(transport)
            .request_token(&credentials())
            .await
            .unwrap_err();
        match err {
            AuthenticationError::ExchangeRejected {
                status,
                status_line,
            } => {
                assert_eq!(status, 401);
                assert_eq!(status_line, "401 Unauthorized");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exchange_invalid_json() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_text_response(200, "not json");

        let err = flow(transport)
            .request_token(&credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthenticationError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_exchange_transport_failure() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_error(NetworkError::ConnectionFailed {
            message: "refused".to_string(),
        });

        let err = flow(transport)
            .request_token(&credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthenticationError::Unreachable { .. }));
    }

    #[tokio::test]
    async fn test_mock_flow_replays_queue() {
        let mock = MockClientCredentialsFlow::new();
        mock.queue_token("first", None)
            .queue_error(AuthenticationError::EmptyToken);

        let first = mock.request_token(&credentials()).await.unwrap();
        assert_eq!(first.access_token, "first");
        assert!(mock.request_token(&credentials()).await.is_err());
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.get_requests()[0], "CLIENT_ID");
    }
}
