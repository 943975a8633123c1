//! # booking-auth
//!
//! Credential handling and token-based authentication for the booking
//! service.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing, legacy PBKDF2 verification, and the
//!   password length policy
//! - `jwt`: signing key, immutable token settings, claims, issuer, and validator
//! - `credentials`: identity signup/update/delete and the login flow

pub mod credentials;
pub mod jwt;
pub mod password;

pub use credentials::{CredentialStore, LoginService};
pub use jwt::{
    Claims, IssuedToken, SigningKey, TokenIssuer, TokenRejection, TokenSettings, TokenValidator,
};
pub use password::{PasswordHasher, PasswordValidator};
