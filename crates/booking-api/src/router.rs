//! Route definitions for the booking HTTP API.
//!
//! All routes are mounted under `/api`. Public routes (health, login,
//! signup) are merged with protected routes that sit behind the bearer
//! token gate.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the request gate.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(me_routes())
        .merge(identity_routes())
        .merge(service_routes())
        .merge(reservation_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let api_routes = Router::new()
        .merge(public_routes())
        .merge(protected);

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Health, login, and signup
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/login", post(handlers::auth::login))
        .route("/identities", post(handlers::identity::create_identity))
}

fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(handlers::auth::me))
}

/// Identity reads, updates, and deletes
fn identity_routes() -> Router<AppState> {
    Router::new()
        .route("/identities", get(handlers::identity::list_identities))
        .route(
            "/identities/{id}",
            get(handlers::identity::get_identity)
                .put(handlers::identity::update_identity)
                .delete(handlers::identity::delete_identity),
        )
}

/// Service CRUD
fn service_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/services",
            get(handlers::service::list_services).post(handlers::service::create_service),
        )
        .route(
            "/services/{id}",
            get(handlers::service::get_service)
                .put(handlers::service::update_service)
                .delete(handlers::service::delete_service),
        )
}

/// Reservation CRUD with list filters
fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reservations",
            get(handlers::reservation::list_reservations)
                .post(handlers::reservation::create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(handlers::reservation::get_reservation)
                .put(handlers::reservation::update_reservation)
                .delete(handlers::reservation::delete_reservation),
        )
}
