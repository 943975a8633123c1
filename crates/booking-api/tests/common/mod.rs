//! Shared test helpers for HTTP integration tests.
//!
//! Every test app runs on in-memory repositories, so no database is needed.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use booking_api::{AppState, build_app};
use booking_auth::SigningKey;
use booking_core::config::AppConfig;
use booking_database::Repositories;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// State behind the router, for direct repository access
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with a fresh signing key
    pub fn new() -> Self {
        Self::with_config(test_config(&SigningKey::generate_base64()))
    }

    /// Create a test application from explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state =
            AppState::new(config, Repositories::memory()).expect("Failed to build app state");
        Self {
            router: build_app(state.clone()),
            state,
        }
    }

    /// Sign up an identity and return its id
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/identities",
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Signup failed: {:?}",
            response.body
        );

        response.body["id"].as_i64().expect("No id in signup response")
    }

    /// Login and return the access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Sign up Ana and return her id and token
    pub async fn signed_in(&self) -> (i64, String) {
        let id = self.signup("Ana", "ana@example.com", "secret123").await;
        let token = self.login("ana@example.com", "secret123").await;
        (id, token)
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Configuration with in-memory storage and the given signing key
pub fn test_config(signing_key: &str) -> AppConfig {
    AppConfig::from_toml(&format!(
        r#"
        [database]
        provider = "memory"

        [auth]
        signing_key = "{signing_key}"
        "#
    ))
    .expect("Failed to parse test config")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}
