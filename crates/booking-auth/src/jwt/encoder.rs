//! JWT token creation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, Header, encode};
use serde::Serialize;

use booking_core::error::AppError;
use booking_entity::identity::Identity;

use super::claims::Claims;
use super::settings::TokenSettings;

/// A freshly signed access token.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// Compact JWS, three base64url segments.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Mints HMAC-SHA256 signed access tokens.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    settings: Arc<TokenSettings>,
}

impl TokenIssuer {
    /// Creates an issuer over shared settings.
    pub fn new(settings: Arc<TokenSettings>) -> Self {
        Self { settings }
    }

    /// Issues a token for the identity, valid from now for the configured ttl.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, AppError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<IssuedToken, AppError> {
        let expires_at = now
            .checked_add_signed(self.settings.ttl())
            .ok_or_else(|| AppError::internal("Token expiry is out of range"))?;

        let claims = Claims {
            sub: identity.id.to_string(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            iss: self.settings.issuer().to_string(),
            aud: self.settings.audience().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            self.settings.encoding_key(),
        )
        .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
