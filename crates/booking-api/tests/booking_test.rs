//! Integration tests for services and reservations.

mod common;

use axum::http::{StatusCode, header};
use serde_json::json;

use common::TestApp;

async fn create_service(app: &TestApp, token: &str, name: &str, price: &str) -> i64 {
    let response = app
        .request(
            "POST",
            "/api/services",
            Some(json!({ "name": name, "price": price })),
            Some(token),
        )
        .await;
    assert_eq!(
        response.status,
        StatusCode::CREATED,
        "Service create failed: {:?}",
        response.body
    );
    response.body["id"].as_i64().unwrap()
}

async fn create_reservation(
    app: &TestApp,
    token: &str,
    identity_id: i64,
    service_id: i64,
    reserved_at: &str,
) -> i64 {
    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(json!({
                "identity_id": identity_id,
                "service_id": service_id,
                "reserved_at": reserved_at,
            })),
            Some(token),
        )
        .await;
    assert_eq!(
        response.status,
        StatusCode::CREATED,
        "Reservation create failed: {:?}",
        response.body
    );
    response.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_service_crud() {
    let app = TestApp::new();
    let (_, token) = app.signed_in().await;

    let id = create_service(&app, &token, "Haircut", "25.00").await;

    let response = app
        .request("GET", &format!("/api/services/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Haircut");
    assert_eq!(response.body["price"], "25.00");

    let response = app
        .request(
            "PUT",
            &format!("/api/services/{id}"),
            Some(json!({ "price": "30.00" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["price"], "30.00");
    assert_eq!(response.body["name"], "Haircut");

    let response = app
        .request("DELETE", &format!("/api/services/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("GET", &format!("/api/services/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_service_rejects_negative_price() {
    let app = TestApp::new();
    let (_, token) = app.signed_in().await;

    let response = app
        .request(
            "POST",
            "/api/services",
            Some(json!({ "name": "Haircut", "price": "-1.00" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_service_rejects_price_outside_column() {
    let app = TestApp::new();
    let (_, token) = app.signed_in().await;

    for price in ["25.005", "10000000000", "99999999999.99"] {
        let response = app
            .request(
                "POST",
                "/api/services",
                Some(json!({ "name": "Haircut", "price": price })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "price {price}");
    }

    let id = create_service(&app, &token, "Haircut", "9999999999.99").await;
    let response = app
        .request(
            "PUT",
            &format!("/api/services/{id}"),
            Some(json!({ "price": "0.001" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("GET", &format!("/api/services/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.body["price"], "9999999999.99");
}

#[tokio::test]
async fn test_service_description_cleared_by_null() {
    let app = TestApp::new();
    let (_, token) = app.signed_in().await;

    let response = app
        .request(
            "POST",
            "/api/services",
            Some(json!({
                "name": "Haircut",
                "description": "Wash and cut",
                "price": "25.00",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_i64().unwrap();

    let response = app
        .request(
            "PUT",
            &format!("/api/services/{id}"),
            Some(json!({ "name": "Trim" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.body["description"], "Wash and cut");

    let response = app
        .request(
            "PUT",
            &format!("/api/services/{id}"),
            Some(json!({ "description": null })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["description"].is_null());
    assert_eq!(response.body["name"], "Trim");
}

#[tokio::test]
async fn test_services_require_token() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/services", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reservation_create_and_fetch() {
    let app = TestApp::new();
    let (ana, token) = app.signed_in().await;
    let service = create_service(&app, &token, "Haircut", "25.00").await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(json!({
                "identity_id": ana,
                "service_id": service,
                "reserved_at": "2024-11-20T10:00:00Z",
                "notes": "window seat",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_i64().unwrap();
    assert_eq!(
        response.headers[header::LOCATION],
        format!("/api/reservations/{id}").as_str()
    );

    let response = app
        .request("GET", &format!("/api/reservations/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["identity_id"], ana);
    assert_eq!(response.body["service_id"], service);
    assert_eq!(response.body["notes"], "window seat");

    let response = app
        .request(
            "PUT",
            &format!("/api/reservations/{id}"),
            Some(json!({ "reserved_at": "2024-11-21T10:00:00Z" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.body["notes"], "window seat");

    let response = app
        .request(
            "PUT",
            &format!("/api/reservations/{id}"),
            Some(json!({ "notes": null })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["notes"].is_null());
    assert_eq!(response.body["reserved_at"], "2024-11-21T10:00:00Z");
}

#[tokio::test]
async fn test_reservation_unknown_references_rejected() {
    let app = TestApp::new();
    let (ana, token) = app.signed_in().await;
    let service = create_service(&app, &token, "Haircut", "25.00").await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(json!({
                "identity_id": ana,
                "service_id": service + 100,
                "reserved_at": "2024-11-20T10:00:00Z",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(json!({
                "identity_id": ana + 100,
                "service_id": service,
                "reserved_at": "2024-11-20T10:00:00Z",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_referenced_rows_conflicts() {
    let app = TestApp::new();
    let (_, token) = app.signed_in().await;
    let bob = app.signup("Bob", "bob@example.com", "secret123").await;
    let bob_token = app.login("bob@example.com", "secret123").await;
    let service = create_service(&app, &token, "Haircut", "25.00").await;
    let reservation =
        create_reservation(&app, &token, bob, service, "2024-11-20T10:00:00Z").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/identities/{bob}"),
            None,
            Some(&bob_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request("DELETE", &format!("/api/services/{service}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "DELETE",
            &format!("/api/reservations/{reservation}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request(
            "DELETE",
            &format!("/api/identities/{bob}"),
            None,
            Some(&bob_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_reservation_list_filters() {
    let app = TestApp::new();
    let (ana, token) = app.signed_in().await;
    let bob = app.signup("Bob", "bob@example.com", "secret123").await;
    let cut = create_service(&app, &token, "Haircut", "25.00").await;
    let shave = create_service(&app, &token, "Shave", "10.00").await;

    create_reservation(&app, &token, ana, cut, "2024-11-20T10:00:00Z").await;
    create_reservation(&app, &token, ana, shave, "2024-11-21T10:00:00Z").await;
    create_reservation(&app, &token, bob, cut, "2024-11-22T10:00:00Z").await;

    let all = app
        .request("GET", "/api/reservations", None, Some(&token))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body.as_array().unwrap().len(), 3);

    let by_ana = app
        .request(
            "GET",
            &format!("/api/reservations?identity_id={ana}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(by_ana.body.as_array().unwrap().len(), 2);

    let by_cut = app
        .request(
            "GET",
            &format!("/api/reservations?service_id={cut}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(by_cut.body.as_array().unwrap().len(), 2);

    let window = app
        .request(
            "GET",
            "/api/reservations?from=2024-11-21T00:00:00Z&to=2024-11-22T10:00:00Z",
            None,
            Some(&token),
        )
        .await;
    let window = window.body.as_array().unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window[0]["service_id"], shave);
}

#[tokio::test]
async fn test_reservation_list_rejects_bad_range() {
    let app = TestApp::new();
    let (_, token) = app.signed_in().await;

    let inverted = app
        .request(
            "GET",
            "/api/reservations?from=2024-11-22T00:00:00Z&to=2024-11-21T00:00:00Z",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(inverted.status, StatusCode::BAD_REQUEST);

    let garbage = app
        .request(
            "GET",
            "/api/reservations?from=yesterday",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(garbage.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reservation_update_and_missing() {
    let app = TestApp::new();
    let (ana, token) = app.signed_in().await;
    let service = create_service(&app, &token, "Haircut", "25.00").await;
    let id = create_reservation(&app, &token, ana, service, "2024-11-20T10:00:00Z").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/reservations/{id}"),
            Some(json!({ "notes": "moved" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["notes"], "moved");

    let response = app
        .request(
            "PUT",
            "/api/reservations/9999",
            Some(json!({ "notes": "nowhere" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
