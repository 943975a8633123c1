//! Immutable token settings shared by the issuer and the validator.

use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey};
use secrecy::ExposeSecret;

use booking_core::config::AuthConfig;
use booking_core::error::AppError;

use super::key::SigningKey;

/// Longest accepted token lifetime: 30 days.
const MAX_TTL_MINUTES: i64 = 30 * 24 * 60;

/// Validated signing key, issuer, audience, and lifetime.
///
/// Built once at startup; every check that can fail happens here.
#[derive(Clone)]
pub struct TokenSettings {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl TokenSettings {
    /// Builds settings from the `[auth]` configuration section.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        let key = SigningKey::from_base64(config.signing_key.expose_secret())?;
        let ttl = i64::try_from(config.token_ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| AppError::configuration("auth.token_ttl_minutes is too large"))?;
        Self::new(key, &config.issuer, &config.audience, ttl)
    }

    /// Builds settings from already-decoded parts.
    pub fn new(
        key: SigningKey,
        issuer: &str,
        audience: &str,
        ttl: Duration,
    ) -> Result<Self, AppError> {
        let issuer = issuer.trim();
        let audience = audience.trim();
        if issuer.is_empty() {
            return Err(AppError::configuration("auth.issuer must not be empty"));
        }
        if audience.is_empty() {
            return Err(AppError::configuration("auth.audience must not be empty"));
        }
        if ttl <= Duration::zero() {
            return Err(AppError::configuration(
                "auth.token_ttl_minutes must be positive",
            ));
        }
        if ttl > Duration::minutes(MAX_TTL_MINUTES) {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_minutes must not exceed {MAX_TTL_MINUTES}"
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(key.expose()),
            decoding_key: DecodingKey::from_secret(key.expose()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            ttl,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
