//! Email shape validation.

use std::sync::LazyLock;

use regex::Regex;

use booking_core::error::AppError;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Trims surrounding whitespace; lookups compare case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

/// Checks `local-part@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    if !EMAIL_SHAPE.is_match(email.trim()) {
        return Err(AppError::validation("Email address is not valid"));
    }
    Ok(())
}
