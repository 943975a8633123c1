//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Login request body.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Signup request body.
#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Identity update body. Absent fields stay unchanged.
#[derive(Deserialize, Validate, Default)]
pub struct UpdateIdentityRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: Option<String>,
}

// Password-bearing bodies never print their content.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for UpdateIdentityRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateIdentityRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_changed", &self.password.is_some())
            .finish()
    }
}

/// Service create body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, message = "Service name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

/// Service update body. An explicit `null` description clears it.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
}

/// Reservation create body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReservationRequest {
    #[validate(range(min = 1, message = "identity_id must be positive"))]
    pub identity_id: i64,
    #[validate(range(min = 1, message = "service_id must be positive"))]
    pub service_id: i64,
    /// RFC 3339 timestamp; offsets are normalized to UTC.
    pub reserved_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Reservation update body. An explicit `null` for notes clears them.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateReservationRequest {
    #[validate(range(min = 1, message = "identity_id must be positive"))]
    pub identity_id: Option<i64>,
    #[validate(range(min = 1, message = "service_id must be positive"))]
    pub service_id: Option<i64>,
    pub reserved_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

/// Marks a field that appeared in the body, so `null` and absent differ.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
