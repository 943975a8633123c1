//! Argon2id password hashing and legacy PBKDF2 verification.
//!
//! New material is always an Argon2id PHC string with fixed parameters
//! (19 MiB memory, 2 passes, 1 lane). The parameters travel inside every PHC
//! string, so older hashes stay verifiable if the defaults ever move.
//!
//! Rows created by the explicit-salt scheme carry a base64 PBKDF2-HMAC-SHA256
//! digest plus a base64 salt. Those are verified but never produced.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Output, PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;
use sha2::Sha256;

use booking_core::error::AppError;
use booking_entity::identity::Credential;

/// PBKDF2 iteration count for the explicit-salt scheme.
pub const PBKDF2_ITERATIONS: u32 = 10_000;
/// PBKDF2 digest length in bytes.
pub const PBKDF2_OUTPUT_LEN: usize = 32;
/// Explicit salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Handles password hashing and verification.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a hasher using Argon2id with the fixed default parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT),
        }
    }

    /// Hashes a plaintext password into self-salting Argon2id material.
    pub fn hash_password(&self, password: &str) -> Result<Credential, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(Credential::self_salted(hash.to_string()))
    }

    /// Verifies a plaintext password against stored material.
    ///
    /// Returns `Ok(false)` on mismatch. Material that cannot be parsed yields
    /// a `CorruptCredential` error rather than a match.
    pub fn verify_password(&self, password: &str, credential: &Credential) -> Result<bool, AppError> {
        match credential.salt() {
            Some(salt) => verify_pbkdf2(password, credential.password_hash(), salt),
            None => self.verify_argon2(password, credential.password_hash()),
        }
    }

    /// Whether the material should be replaced by a fresh Argon2id hash after
    /// a successful verification.
    pub fn needs_rehash(&self, credential: &Credential) -> bool {
        if credential.is_explicitly_salted() {
            return true;
        }
        let Ok(parsed) = PasswordHash::new(credential.password_hash()) else {
            return true;
        };
        if parsed.algorithm != argon2::ARGON2ID_IDENT {
            return true;
        }
        match Params::try_from(&parsed) {
            Ok(params) => {
                params.m_cost() != Params::DEFAULT_M_COST
                    || params.t_cost() != Params::DEFAULT_T_COST
                    || params.p_cost() != Params::DEFAULT_P_COST
            }
            Err(_) => true,
        }
    }

    fn verify_argon2(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::corrupt_credential(format!("Invalid password hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::corrupt_credential(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a random 128-bit salt, base64-encoded.
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// Derives the base64 PBKDF2-HMAC-SHA256 digest of a password under a
/// base64 salt.
pub fn derive_pbkdf2(password: &str, salt: &str) -> Result<String, AppError> {
    let salt = STANDARD
        .decode(salt)
        .map_err(|e| AppError::corrupt_credential(format!("Invalid salt encoding: {e}")))?;
    Ok(STANDARD.encode(pbkdf2_digest(password, &salt)))
}

fn pbkdf2_digest(password: &str, salt: &[u8]) -> [u8; PBKDF2_OUTPUT_LEN] {
    let mut out = [0u8; PBKDF2_OUTPUT_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut out);
    out
}

fn verify_pbkdf2(password: &str, stored: &str, salt: &str) -> Result<bool, AppError> {
    let salt = STANDARD
        .decode(salt)
        .map_err(|e| AppError::corrupt_credential(format!("Invalid salt encoding: {e}")))?;
    let stored = STANDARD
        .decode(stored)
        .map_err(|e| AppError::corrupt_credential(format!("Invalid digest encoding: {e}")))?;
    if stored.len() != PBKDF2_OUTPUT_LEN {
        return Err(AppError::corrupt_credential(format!(
            "Digest has {} bytes, expected {PBKDF2_OUTPUT_LEN}",
            stored.len()
        )));
    }

    // `Output` equality is constant-time.
    let expected = Output::new(&stored)
        .map_err(|e| AppError::corrupt_credential(format!("Invalid digest: {e}")))?;
    let actual = Output::new(&pbkdf2_digest(password, &salt))
        .map_err(|e| AppError::internal(format!("Digest construction failed: {e}")))?;
    Ok(expected == actual)
}
