//! Integration tests for signup and identity management.

mod common;

use axum::http::{StatusCode, header};

use common::TestApp;

#[tokio::test]
async fn test_signup_creates_identity() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/identities",
            Some(serde_json::json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "secret123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_i64().unwrap();
    assert_eq!(
        response.headers[header::LOCATION],
        format!("/api/identities/{id}").as_str()
    );
    assert_eq!(response.body["name"], "Ana");
    assert!(response.body.get("password_hash").is_none());
    assert!(response.body.get("salt").is_none());
}

#[tokio::test]
async fn test_signup_rejects_bad_email_without_creating() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/identities",
            Some(serde_json::json!({
                "name": "Ana",
                "email": "not-an-email",
                "password": "secret123",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let (_, token) = app.signed_in().await;
    let list = app
        .request("GET", "/api/identities", None, Some(&token))
        .await;
    assert_eq!(list.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/identities",
            Some(serde_json::json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "short",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.signup("Ana", "ana@example.com", "secret123").await;

    let response = app
        .request(
            "POST",
            "/api/identities",
            Some(serde_json::json!({
                "name": "Other Ana",
                "email": "ana@example.com",
                "password": "another-secret",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_password_changes_login() {
    let app = TestApp::new();
    let (id, token) = app.signed_in().await;

    let response = app
        .request(
            "PUT",
            &format!("/api/identities/{id}"),
            Some(serde_json::json!({ "password": "brand-new-pass" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "ana@example.com");

    let old = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({
                "email": "ana@example.com",
                "password": "secret123",
            })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    app.login("ana@example.com", "brand-new-pass").await;
}

#[tokio::test]
async fn test_get_missing_identity() {
    let app = TestApp::new();
    let (_, token) = app.signed_in().await;

    let response = app
        .request("GET", "/api/identities/9999", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/api/identities/abc", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_own_identity() {
    let app = TestApp::new();
    app.signed_in().await;
    let bob = app.signup("Bob", "bob@example.com", "secret123").await;
    let bob_token = app.login("bob@example.com", "secret123").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/identities/{bob}"),
            None,
            Some(&bob_token),
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
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cannot_change_another_identity() {
    let app = TestApp::new();
    let (_, ana_token) = app.signed_in().await;
    let bob = app.signup("Bob", "bob@example.com", "secret123").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/identities/{bob}"),
            Some(serde_json::json!({ "password": "taken-over-pass" })),
            Some(&ana_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let hijack = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({
                "email": "bob@example.com",
                "password": "taken-over-pass",
            })),
            None,
        )
        .await;
    assert_eq!(hijack.status, StatusCode::UNAUTHORIZED);
    app.login("bob@example.com", "secret123").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/identities/{bob}"),
            Some(serde_json::json!({ "email": "ana-owns-this@example.com" })),
            Some(&ana_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "DELETE",
            &format!("/api/identities/{bob}"),
            None,
            Some(&ana_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "GET",
            &format!("/api/identities/{bob}"),
            None,
            Some(&ana_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "bob@example.com");
}
