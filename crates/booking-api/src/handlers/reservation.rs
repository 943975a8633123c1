//! Reservation handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use booking_core::error::AppError;
use booking_entity::reservation::{
    CreateReservation, Reservation, ReservationFilter, UpdateReservation,
};

use crate::dto::request::{CreateReservationRequest, UpdateReservationRequest};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{IdPath, ValidatedJson};
use crate::state::AppState;

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("Reservation {id} not found"))
}

/// Rejects references to identities or services that do not exist.
async fn check_references(
    state: &AppState,
    identity_id: Option<i64>,
    service_id: Option<i64>,
) -> Result<(), AppError> {
    if let Some(id) = identity_id {
        if state.repos.identities.find_by_id(id).await?.is_none() {
            return Err(AppError::validation(format!("Identity {id} does not exist")));
        }
    }
    if let Some(id) = service_id {
        if state.repos.services.find_by_id(id).await?.is_none() {
            return Err(AppError::validation(format!("Service {id} does not exist")));
        }
    }
    Ok(())
}

/// GET /api/reservations?identity_id=&service_id=&from=&to=
pub async fn list_reservations(
    State(state): State<AppState>,
    query: Result<Query<ReservationFilter>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<Json<Vec<Reservation>>> {
    let Query(filter) = query.map_err(ApiError::from)?;
    filter.validate()?;
    Ok(Json(state.repos.reservations.list(&filter).await?))
}

/// POST /api/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateReservationRequest>,
) -> ApiResult<impl IntoResponse> {
    check_references(&state, Some(req.identity_id), Some(req.service_id)).await?;

    let input = CreateReservation {
        identity_id: req.identity_id,
        service_id: req.service_id,
        reserved_at: req.reserved_at,
        notes: req.notes,
    };
    let reservation = state.repos.reservations.create(&input).await?;

    let location = format!("/api/reservations/{}", reservation.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(reservation),
    ))
}

/// GET /api/reservations/{id}
pub async fn get_reservation(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<Reservation>> {
    let reservation = state
        .repos
        .reservations
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(reservation))
}

/// PUT /api/reservations/{id}
pub async fn update_reservation(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<UpdateReservationRequest>,
) -> ApiResult<Json<Reservation>> {
    check_references(&state, req.identity_id, req.service_id).await?;

    let input = UpdateReservation {
        identity_id: req.identity_id,
        service_id: req.service_id,
        reserved_at: req.reserved_at,
        notes: req.notes,
    };
    let reservation = state
        .repos
        .reservations
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(reservation))
}

/// DELETE /api/reservations/{id}
pub async fn delete_reservation(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    if !state.repos.reservations.delete(id).await? {
        return Err(not_found(id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
