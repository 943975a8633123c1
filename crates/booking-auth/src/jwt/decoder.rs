//! JWT token validation for the request gate.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, Validation, decode};
use thiserror::Error;

use booking_core::error::AppError;

use super::claims::Claims;
use super::settings::TokenSettings;

/// Why a bearer token was refused. Logged, never sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("no bearer token presented")]
    Missing,
    #[error("token is not a well-formed JWT")]
    Malformed,
    #[error("token signature does not verify")]
    BadSignature,
    #[error("token issuer does not match")]
    IssuerMismatch,
    #[error("token audience does not match")]
    AudienceMismatch,
    #[error("token has expired")]
    Expired,
}

impl From<TokenRejection> for AppError {
    fn from(_: TokenRejection) -> Self {
        AppError::authentication("Authentication required")
    }
}

/// Verifies signature, issuer, audience, and expiry, in that order.
#[derive(Clone)]
pub struct TokenValidator {
    settings: Arc<TokenSettings>,
    validation: Validation,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("settings", &self.settings)
            .finish()
    }
}

impl TokenValidator {
    /// Creates a validator over shared settings.
    pub fn new(settings: Arc<TokenSettings>) -> Self {
        // Signature and algorithm only; the claim checks run afterwards so
        // they happen in a fixed order against an injectable clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            settings,
            validation,
        }
    }

    /// Validates a token against the current time.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenRejection> {
        self.validate_at(token, Utc::now())
    }

    /// Validates a token as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenRejection> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenRejection::Missing);
        }

        let claims = decode::<Claims>(token, self.settings.decoding_key(), &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    TokenRejection::BadSignature
                }
                _ => TokenRejection::Malformed,
            })?
            .claims;

        if claims.iss != self.settings.issuer() {
            return Err(TokenRejection::IssuerMismatch);
        }
        if claims.aud != self.settings.audience() {
            return Err(TokenRejection::AudienceMismatch);
        }
        if now.timestamp() >= claims.exp {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }
}
