//! Authentication configuration.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Credential and token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Base64-encoded HMAC-SHA256 signing key (at least 32 decoded bytes).
    #[serde(default = "default_signing_key", deserialize_with = "deserialize_secret")]
    pub signing_key: SecretString,
    /// Value of the `iss` claim on issued tokens.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Value of the `aud` claim on issued tokens.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Minimum accepted password length at signup and password change.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_key: default_signing_key(),
            issuer: default_issuer(),
            audience: default_audience(),
            token_ttl_minutes: default_token_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

fn default_signing_key() -> SecretString {
    SecretString::from(String::new())
}

fn default_issuer() -> String {
    "booking-api".to_string()
}

fn default_audience() -> String {
    "booking-clients".to_string()
}

fn default_token_ttl() -> u64 {
    60
}

fn default_password_min() -> usize {
    8
}
