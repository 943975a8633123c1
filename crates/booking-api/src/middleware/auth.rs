//! Bearer token request gate.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use tracing::debug;

use booking_auth::TokenRejection;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Rejects the request with `401` unless it carries a valid bearer token.
///
/// On success the verified claims are attached as an [`AuthUser`] extension
/// before the handler runs. The rejection reason is logged at debug level
/// and never sent to the client.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = match authenticate(&state, &request) {
        Ok(user) => user,
        Err(reason) => {
            debug!(
                path = %request.uri().path(),
                reason = %reason,
                "Request gate rejected token"
            );
            return Err(reason.into());
        }
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn authenticate(state: &AppState, request: &Request) -> Result<AuthUser, TokenRejection> {
    let header = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(TokenRejection::Missing)?;

    let claims = state.validator.validate(header.token())?;
    let identity_id = claims
        .identity_id()
        .map_err(|_| TokenRejection::Malformed)?;

    Ok(AuthUser {
        identity_id,
        claims,
    })
}
