//! JWT claims structure used in access tokens.

use serde::{Deserialize, Serialize};

use booking_core::error::AppError;

/// JWT claims payload embedded in every access token.
///
/// No roles or scopes: any valid token grants access to every protected route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the identity id as a decimal string.
    pub sub: String,
    /// Identity display name at issuance.
    pub name: String,
    /// Identity email at issuance.
    pub email: String,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the identity id from the subject claim.
    pub fn identity_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::authentication("Invalid token subject"))
    }
}
