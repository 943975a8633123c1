//! Identity handlers: signup and CRUD.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use booking_core::error::AppError;

use crate::dto::request::{SignupRequest, UpdateIdentityRequest};
use crate::dto::response::IdentityResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::state::AppState;

/// POST /api/identities
pub async fn create_identity(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let identity = state
        .credentials
        .create(&req.name, &req.email, &req.password)
        .await?;

    let location = format!("/api/identities/{}", identity.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(IdentityResponse::from(identity)),
    ))
}

/// GET /api/identities
pub async fn list_identities(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<IdentityResponse>>> {
    let identities = state.credentials.list().await?;
    Ok(Json(identities.into_iter().map(Into::into).collect()))
}

/// GET /api/identities/{id}
pub async fn get_identity(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<IdentityResponse>> {
    Ok(Json(state.credentials.get(id).await?.into()))
}

/// Credential-bearing writes are limited to the token's own identity.
fn ensure_owner(auth: &AuthUser, id: i64) -> Result<(), AppError> {
    if auth.identity_id != id {
        return Err(AppError::forbidden(
            "Identities can only be changed by their owner",
        ));
    }
    Ok(())
}

/// PUT /api/identities/{id}
pub async fn update_identity(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<UpdateIdentityRequest>,
) -> ApiResult<Json<IdentityResponse>> {
    ensure_owner(&auth, id)?;
    let identity = state
        .credentials
        .update(
            id,
            req.name.as_deref(),
            req.email.as_deref(),
            req.password.as_deref(),
        )
        .await?;
    Ok(Json(identity.into()))
}

/// DELETE /api/identities/{id}
pub async fn delete_identity(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    ensure_owner(&auth, id)?;
    state.credentials.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
