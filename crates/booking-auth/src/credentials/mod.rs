//! Identity credential flows: signup, profile changes, and login.

pub mod login;
pub mod store;

pub use login::LoginService;
pub use store::CredentialStore;

use booking_core::error::AppError;
use booking_entity::identity::Credential;

use crate::password::PasswordHasher;

/// Hashes on the blocking pool so Argon2 never stalls the reactor.
pub(crate) async fn hash_blocking(
    hasher: &PasswordHasher,
    password: &str,
) -> Result<Credential, AppError> {
    let hasher = hasher.clone();
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hasher.hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
}

/// Verifies on the blocking pool.
pub(crate) async fn verify_blocking(
    hasher: &PasswordHasher,
    password: &str,
    credential: &Credential,
) -> Result<bool, AppError> {
    let hasher = hasher.clone();
    let password = password.to_owned();
    let credential = credential.clone();
    tokio::task::spawn_blocking(move || hasher.verify_password(&password, &credential))
        .await
        .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
}
