//! Payment tests

use super::*;
use mercadopago_client::{FlexibleId, FormParams, MercadoPagoError, Payment};
use wiremock::matchers::{body_string, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_get_payment_uses_static_token_without_exchange() {
    let server = setup_mock_server().await;
    mount_token_exchange(&server, 0).await;

    Mock::given(method("GET"))
        .and(path("/v1/payments/8262805"))
        .and(query_param("access_token", STATIC_TOKEN))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 8262805,
            "status": "approved",
            "issuer_id": "310",
            "payer": {"id": 99, "email": "buyer@example.com"},
            "order": {"type": "mercadopago", "id": 1234}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let payment = client.payments().get("8262805").await.unwrap();
    assert!(payment.is_approved());
    assert_eq!(payment.issuer_id, Some(FlexibleId::Text("310".to_string())));
    assert_eq!(payment.order.unwrap().id, Some(FlexibleId::Number(1234)));
}

#[tokio::test]
async fn test_search_by_external_reference_sends_form_body() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/v1/payments/search"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(format!(
            "access_token={}&external_reference=ExRef",
            STATIC_TOKEN
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paging": {"total": 2, "limit": 30, "offset": 0},
            "results": [
                {"id": 1, "status": "approved", "external_reference": "ExRef"},
                {"id": 2, "status": "rejected", "external_reference": "ExRef"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let found = client
        .payments()
        .search_by_external_reference("ExRef")
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found.iter().filter(|p| p.is_approved()).count(), 1);
}

#[tokio::test]
async fn test_search_with_filters() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/v1/payments/search"))
        .and(body_string_contains("status=approved"))
        .and(body_string_contains("limit=10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paging": {"total": 0, "limit": 10, "offset": 0},
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filters = FormParams::new()
        .with("status", "approved")
        .with("limit", "10");
    let found = client.payments().search(filters).await.unwrap();
    assert!(found.is_empty());
    assert_eq!(found.paging.limit, 10);
}

#[tokio::test]
async fn test_create_payment_bad_request() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/payments"))
        .and(query_param("access_token", STATIC_TOKEN))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid transaction_amount",
            "error": "bad_request",
            "status": 400,
            "cause": [{"code": 4037, "description": "Invalid transaction_amount"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let payment = Payment {
        transaction_amount: Some(-1.0),
        payment_method_id: Some("visa".to_string()),
        ..Default::default()
    };
    let err = client.payments().create(&payment).await.unwrap_err();

    match err {
        MercadoPagoError::Api(api) => {
            assert_eq!(api.status, 400);
            let body = api.api_error();
            assert_eq!(body.message, "Invalid transaction_amount");
            assert_eq!(body.cause.len(), 1);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
