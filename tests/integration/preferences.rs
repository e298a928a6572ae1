//! Checkout preference tests

use super::*;
use mercadopago_client::{user_agent, Item, MercadoPagoError, Preference, PreferencePayer};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_create_preference() {
    let server = setup_mock_server().await;
    mount_token_exchange(&server, 1).await;

    Mock::given(method("POST"))
        .and(path("/checkout/preferences"))
        .and(query_param("access_token", MOCK_TOKEN))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(header("user-agent", user_agent().as_str()))
        .and(body_partial_json(json!({
            "external_reference": "ExRef",
            "items": [{"id": "Item1_ID", "title": "Item1_title", "quantity": 1, "currency_id": "ARS", "unit_price": 10.2}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "202809963-920c288b",
            "init_point": "https://www.mercadopago.com/checkout?pref_id=202809963-920c288b",
            "sandbox_init_point": "https://sandbox.mercadopago.com/checkout?pref_id=202809963-920c288b",
            "collector_id": 202809963,
            "external_reference": "ExRef",
            "items": [{"id": "Item1_ID", "title": "Item1_title", "quantity": 1, "currency_id": "ARS", "unit_price": 10.2}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let preference = Preference::with_reference("ExRef")
        .payer(PreferencePayer {
            name: Some("Jon".to_string()),
            surname: Some("Snow".to_string()),
            email: Some("jonsnow@winterfell.north".to_string()),
            ..Default::default()
        })
        .item(Item::new("Item1_ID", "Item1_title", 1, "ARS", 10.2));

    let created = client.preferences().create(&preference).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("202809963-920c288b"));
    assert_eq!(created.items[0].total(), Some(10.2));
    assert_eq!(
        client.checkout_url(&created),
        Some("https://sandbox.mercadopago.com/checkout?pref_id=202809963-920c288b")
    );
}

#[tokio::test]
async fn test_get_preference_not_found_keeps_body_undecoded() {
    let server = setup_mock_server().await;
    mount_token_exchange(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/checkout/preferences/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "preference not found",
            "error": "not_found",
            "status": 404,
            "cause": []
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.preferences().get("missing").await.unwrap_err();

    match err {
        MercadoPagoError::Api(api) => {
            assert_eq!(api.status, 404);
            assert_eq!(
                api.to_string(),
                "Bad status received in HTTP response: 404 Not Found"
            );
            let body = api.api_error();
            assert_eq!(body.message, "preference not found");
            assert_eq!(body.error.as_deref(), Some("not_found"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_update_preference() {
    let server = setup_mock_server().await;
    mount_token_exchange(&server, 1).await;

    Mock::given(method("PUT"))
        .and(path("/checkout/preferences/pref-1"))
        .and(query_param("access_token", MOCK_TOKEN))
        .and(body_partial_json(json!({"external_reference": "Updated"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pref-1",
            "external_reference": "Updated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let updated = client
        .preferences()
        .update("pref-1", &Preference::with_reference("Updated"))
        .await
        .unwrap();
    assert_eq!(updated.external_reference.as_deref(), Some("Updated"));
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = setup_mock_server().await;
    mount_token_exchange(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/checkout/preferences/pref-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.preferences().get("pref-1").await.unwrap_err();
    assert_eq!(err.error_code(), "MP_DECODE");
}
