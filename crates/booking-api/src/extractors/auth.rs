//! `AuthUser` extractor: the claims the request gate attached to the request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use booking_auth::{Claims, TokenRejection};

use crate::error::ApiError;

/// Authenticated caller, available to handlers behind the request gate.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Identity id from the token subject.
    pub identity_id: i64,
    /// Verified token claims.
    pub claims: Claims,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| TokenRejection::Missing.into())
    }
}
