//! Token acquisition tests

use super::*;
use futures::future::join_all;
use mercadopago_client::{AuthenticationError, MercadoPagoError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_token_exchanged_once_across_calls() {
    let server = setup_mock_server().await;
    mount_token_exchange(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/checkout/preferences/pref-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "pref-1"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.preferences().get("pref-1").await.unwrap();
    client.preferences().get("pref-1").await.unwrap();

    let token = client.cached_token().await.unwrap();
    assert_eq!(token.access_token(), MOCK_TOKEN);
    assert_eq!(token.user_id, 202809963);
    assert!(token.expires_at.is_some());
}

#[tokio::test]
async fn test_concurrent_first_calls_share_one_exchange() {
    let server = setup_mock_server().await;
    mount_token_exchange(&server, 1).await;

    let client = client_for(&server);
    let tokens = join_all((0..5).map(|_| client.access_token())).await;

    for token in tokens {
        assert_eq!(token.unwrap(), MOCK_TOKEN);
    }
}

#[tokio::test]
async fn test_rejected_exchange_sends_no_resource_request() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "invalid client_id or client_secret",
            "error": "invalid_client",
            "status": 400
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/checkout/preferences/pref-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "pref-1"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.preferences().get("pref-1").await.unwrap_err();
    match err {
        MercadoPagoError::Authentication(AuthenticationError::ExchangeRejected {
            status, ..
        }) => assert_eq!(status, 400),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(client.cached_token().await.is_none());

    // Nothing cached, so the next call exchanges again.
    assert!(client.access_token().await.is_err());
}

#[tokio::test]
async fn test_empty_token_is_an_authentication_error() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "bearer"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.access_token().await.unwrap_err();
    assert!(matches!(
        err,
        MercadoPagoError::Authentication(AuthenticationError::EmptyToken)
    ));
    assert!(err.needs_reauth());
}

#[tokio::test]
async fn test_invalidate_triggers_new_exchange() {
    let server = setup_mock_server().await;
    mount_token_exchange(&server, 2).await;

    let client = client_for(&server);
    client.access_token().await.unwrap();
    client.invalidate_access_token().await;
    client.access_token().await.unwrap();
}
