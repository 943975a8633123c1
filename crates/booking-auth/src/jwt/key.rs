//! HMAC signing key material.

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretSlice};

use booking_core::error::AppError;

/// Smallest accepted decoded key, the HMAC-SHA256 block output size.
pub const MIN_KEY_BYTES: usize = 32;
/// Length of keys produced by [`SigningKey::generate_base64`].
pub const GENERATED_KEY_BYTES: usize = 64;

/// Decoded HMAC-SHA256 key bytes. Never printed, never padded.
pub struct SigningKey {
    bytes: SecretSlice<u8>,
}

impl SigningKey {
    /// Decodes a base64 key, rejecting empty, malformed, or undersized input.
    pub fn from_base64(encoded: &str) -> Result<Self, AppError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(AppError::configuration("auth.signing_key is not set"));
        }

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| AppError::configuration("auth.signing_key is not valid base64"))?;

        if bytes.len() < MIN_KEY_BYTES {
            return Err(AppError::configuration(format!(
                "auth.signing_key must decode to at least {MIN_KEY_BYTES} bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Self {
            bytes: SecretSlice::from(bytes),
        })
    }

    /// Produces a fresh random key, base64-encoded for configuration.
    pub fn generate_base64() -> String {
        let mut bytes = [0u8; GENERATED_KEY_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        STANDARD.encode(bytes)
    }

    pub(crate) fn expose(&self) -> &[u8] {
        self.bytes.expose_secret()
    }

    /// Decoded key length in bytes.
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    /// Always false; empty keys cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
