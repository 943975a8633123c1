//! Opaque stored password material.

use std::fmt;

use sqlx::FromRow;

/// Password material as persisted for one identity.
///
/// Either a self-describing PHC string (Argon2id, `salt` absent) or a legacy
/// base64 PBKDF2 digest paired with its base64 salt. The plaintext is never
/// part of this type, and `Debug` never prints the material.
#[derive(Clone, PartialEq, Eq, FromRow)]
pub struct Credential {
    password_hash: String,
    salt: Option<String>,
}

impl Credential {
    /// Wraps a self-salting hash such as an Argon2 PHC string.
    pub fn self_salted(password_hash: impl Into<String>) -> Self {
        Self {
            password_hash: password_hash.into(),
            salt: None,
        }
    }

    /// Wraps a digest produced with an explicit, separately stored salt.
    pub fn salted(password_hash: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            password_hash: password_hash.into(),
            salt: Some(salt.into()),
        }
    }

    /// The stored hash string.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// The explicit salt, if this credential uses one.
    pub fn salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    /// Whether this credential was produced by the explicit-salt scheme.
    pub fn is_explicitly_salted(&self) -> bool {
        self.salt.is_some()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("password_hash", &"[REDACTED]")
            .field("salt", &self.salt.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
