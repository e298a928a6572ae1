//! Integration tests using WireMock
//!
//! Drive the full client against a mock HTTP server: token exchange, request
//! encoding, status handling and decoding.

mod auth;
mod payments;
mod preferences;

use mercadopago_client::{mercadopago_config, MercadoPagoClient};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token the mock authorization endpoint hands out.
pub const MOCK_TOKEN: &str = "APP_USR-mock-token";

/// Static token configured for payment operations.
pub const STATIC_TOKEN: &str = "APP_USR-static-token";

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at `server`, with a static token configured.
pub fn client_for(server: &MockServer) -> MercadoPagoClient {
    let config = mercadopago_config()
        .client_id("CLIENT_ID")
        .client_secret("CLIENT_SECRET")
        .access_token(STATIC_TOKEN)
        .sandbox(true)
        .base_url(server.uri())
        .build()
        .expect("valid config");
    MercadoPagoClient::new(config).expect("client builds")
}

/// Token exchange mock that must be hit exactly `times` times.
pub async fn mount_token_exchange(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=CLIENT_ID"))
        .and(body_string_contains("client_secret=CLIENT_SECRET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": MOCK_TOKEN,
            "refresh_token": "TG-refresh",
            "live_mode": false,
            "user_id": 202809963,
            "token_type": "bearer",
            "expires_in": 21600,
            "scope": "offline_access payments read write"
        })))
        .expect(times)
        .mount(server)
        .await;
}
