//! Service handlers.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use booking_core::error::AppError;
use booking_entity::service::{CreateService, Service, UpdateService};

use crate::dto::request::{CreateServiceRequest, UpdateServiceRequest};
use crate::error::ApiResult;
use crate::extractors::{IdPath, ValidatedJson};
use crate::state::AppState;

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("Service {id} not found"))
}

/// GET /api/services
pub async fn list_services(State(state): State<AppState>) -> ApiResult<Json<Vec<Service>>> {
    Ok(Json(state.repos.services.list().await?))
}

/// POST /api/services
pub async fn create_service(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateServiceRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = CreateService::new(&req.name, req.description, req.price)?;
    let service = state.repos.services.create(&input).await?;

    let location = format!("/api/services/{}", service.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(service)))
}

/// GET /api/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<Service>> {
    let service = state
        .repos
        .services
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(service))
}

/// PUT /api/services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<UpdateServiceRequest>,
) -> ApiResult<Json<Service>> {
    let input = UpdateService::new(req.name.as_deref(), req.description, req.price)?;
    let service = state
        .repos
        .services
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(service))
}

/// DELETE /api/services/{id}
pub async fn delete_service(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    if !state.repos.services.delete(id).await? {
        return Err(not_found(id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
