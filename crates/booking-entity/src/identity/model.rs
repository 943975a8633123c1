//! Identity entity model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use booking_core::error::AppError;

use super::credential::Credential;
use super::email::{normalize_email, validate_email};

/// A client who can sign up, log in, and hold reservations.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Identity {
    /// Assigned by persistence on creation.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login key, unique case-insensitively.
    pub email: String,
    /// Stored password material.
    #[serde(skip_serializing)]
    #[sqlx(flatten)]
    pub credential: Credential,
    /// When the identity was created.
    pub created_at: DateTime<Utc>,
    /// When the identity was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to persist a new identity.
///
/// Only ever carries hashed material; building one validates name and email.
#[derive(Debug, Clone)]
pub struct CreateIdentity {
    /// Display name.
    pub name: String,
    /// Login email, trimmed.
    pub email: String,
    /// Hashed password material.
    pub credential: Credential,
}

impl CreateIdentity {
    /// Validates name and email and pairs them with hashed material.
    pub fn new(name: &str, email: &str, credential: Credential) -> Result<Self, AppError> {
        let name = validate_name(name)?;
        validate_email(email)?;
        Ok(Self {
            name,
            email: normalize_email(email),
            credential,
        })
    }
}

/// Partial update for an existing identity. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateIdentity {
    /// New display name.
    pub name: Option<String>,
    /// New login email.
    pub email: Option<String>,
    /// Replacement password material.
    pub credential: Option<Credential>,
}

impl UpdateIdentity {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.credential.is_none()
    }

    /// Applies this update to an in-memory identity.
    pub fn apply_to(&self, identity: &mut Identity, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            identity.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            identity.email.clone_from(email);
        }
        if let Some(credential) = &self.credential {
            identity.credential = credential.clone();
        }
        identity.updated_at = now;
    }
}

/// Trims a display name and rejects blank ones.
pub fn validate_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    Ok(trimmed.to_string())
}
