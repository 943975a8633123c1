//! Integration tests for the panic boundary around handlers.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use tower::ServiceExt;

use booking_api::apply_layers;
use booking_core::config::CorsConfig;

const PANIC_DETAIL: &str = "pool exhausted at postgres://booking:hunter2@db/booking";

async fn exploding_handler() -> &'static str {
    panic!("{}", PANIC_DETAIL);
}

#[tokio::test]
async fn test_handler_panic_becomes_generic_500() {
    let router = apply_layers(
        Router::new().route("/explode", get(exploding_handler)),
        &CorsConfig::default(),
    );

    let response = router
        .oneshot(
            Request::builder()
                .uri("/explode")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!text.contains("hunter2"));
    assert!(!text.contains("pool exhausted"));

    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert_eq!(body["message"], "An internal error occurred");
}

#[tokio::test]
async fn test_routes_after_panic_keep_working() {
    let router = apply_layers(
        Router::new()
            .route("/explode", get(exploding_handler))
            .route("/ok", get(|| async { "fine" })),
        &CorsConfig::default(),
    );

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = router
        .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
