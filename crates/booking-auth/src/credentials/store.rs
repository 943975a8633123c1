//! Credential store: identity create, update, delete, and reads.

use std::sync::Arc;

use tracing::info;

use booking_core::config::AuthConfig;
use booking_core::error::AppError;
use booking_database::IdentityRepository;
use booking_entity::identity::{
    CreateIdentity, Identity, UpdateIdentity, normalize_email, validate_email, validate_name,
};

use super::hash_blocking;
use crate::password::{PasswordHasher, PasswordValidator};

/// Owns every write of credential material. Plaintext passwords enter here
/// and leave only as hashes.
#[derive(Clone)]
pub struct CredentialStore {
    identities: Arc<dyn IdentityRepository>,
    hasher: PasswordHasher,
    policy: PasswordValidator,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        hasher: PasswordHasher,
        config: &AuthConfig,
    ) -> Self {
        Self {
            identities,
            hasher,
            policy: PasswordValidator::new(config),
        }
    }

    /// Signs up a new identity.
    ///
    /// Validates every field before hashing, rejects a taken email with a
    /// conflict, and stores only the Argon2id material.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, AppError> {
        validate_name(name)?;
        validate_email(email)?;
        self.policy.validate(password)?;

        let email = normalize_email(email);
        if self.identities.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let credential = hash_blocking(&self.hasher, password).await?;
        let input = CreateIdentity::new(name, &email, credential)?;
        let identity = self.identities.create(&input).await?;

        info!(identity_id = identity.id, "Identity created");
        Ok(identity)
    }

    /// Changes any of name, email, or password.
    ///
    /// A new email is re-validated and must stay unique; a new password is
    /// re-hashed. Omitted fields, including the stored hash, are untouched.
    pub async fn update(
        &self,
        id: i64,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Identity, AppError> {
        let current = self.get(id).await?;

        let name = name.map(validate_name).transpose()?;

        let email = match email {
            Some(email) => {
                validate_email(email)?;
                let email = normalize_email(email);
                if let Some(owner) = self.identities.find_by_email(&email).await? {
                    if owner.id != current.id {
                        return Err(AppError::conflict("Email is already registered"));
                    }
                }
                Some(email)
            }
            None => None,
        };

        let credential = match password {
            Some(password) => {
                self.policy.validate(password)?;
                Some(hash_blocking(&self.hasher, password).await?)
            }
            None => None,
        };

        let changes = UpdateIdentity {
            name,
            email,
            credential,
        };
        if changes.is_empty() {
            return Ok(current);
        }

        let password_changed = changes.credential.is_some();
        let updated = self
            .identities
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Identity {id} not found")))?;

        info!(identity_id = id, password_changed, "Identity updated");
        Ok(updated)
    }

    /// Deletes an identity.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.identities.delete(id).await? {
            return Err(AppError::not_found(format!("Identity {id} not found")));
        }
        info!(identity_id = id, "Identity deleted");
        Ok(())
    }

    /// Fetches one identity.
    pub async fn get(&self, id: i64) -> Result<Identity, AppError> {
        self.identities
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Identity {id} not found")))
    }

    /// Lists every identity.
    pub async fn list(&self) -> Result<Vec<Identity>, AppError> {
        self.identities.list().await
    }
}
