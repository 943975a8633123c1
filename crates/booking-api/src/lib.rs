//! # booking-api
//!
//! HTTP API layer for the booking service built on Axum.
//!
//! Provides the REST endpoints, the bearer-token request gate, CORS and
//! request logging middleware, extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{apply_layers, build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
