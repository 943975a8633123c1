//! Auth handlers: login and me.

use axum::Json;
use axum::extract::State;

use crate::dto::request::LoginRequest;
use crate::dto::response::{IdentityResponse, LoginResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let issued = state.login.login(&req.email, &req.password).await?;
    Ok(Json(issued.into()))
}

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<IdentityResponse>> {
    let identity = state.credentials.get(auth.identity_id).await?;
    Ok(Json(identity.into()))
}
