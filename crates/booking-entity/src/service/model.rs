//! Service entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use booking_core::error::AppError;

/// Something a client can reserve.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    /// Assigned by persistence on creation.
    pub id: i64,
    /// Service name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Price, never negative.
    pub price: Decimal,
    /// When the service was created.
    pub created_at: DateTime<Utc>,
    /// When the service was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a service.
#[derive(Debug, Clone)]
pub struct CreateService {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

impl CreateService {
    /// Validates name and price.
    pub fn new(name: &str, description: Option<String>, price: Decimal) -> Result<Self, AppError> {
        Ok(Self {
            name: validate_service_name(name)?,
            description,
            price: validate_price(price)?,
        })
    }
}

/// Partial update for a service.
///
/// `description` is `None` to keep the stored value and `Some(None)` to clear it.
#[derive(Debug, Clone, Default)]
pub struct UpdateService {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
}

impl UpdateService {
    /// Validates whichever fields are present.
    pub fn new(
        name: Option<&str>,
        description: Option<Option<String>>,
        price: Option<Decimal>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            name: name.map(validate_service_name).transpose()?,
            description,
            price: price.map(validate_price).transpose()?,
        })
    }

    /// Applies this update to an in-memory service.
    pub fn apply_to(&self, service: &mut Service, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            service.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            service.description.clone_from(description);
        }
        if let Some(price) = self.price {
            service.price = price;
        }
        service.updated_at = now;
    }
}

fn validate_service_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Service name is required"));
    }
    Ok(trimmed.to_string())
}

/// Prices are stored as NUMERIC(12,2).
const MAX_PRICE_SCALE: u32 = 2;
const MAX_PRICE_INTEGER_DIGITS: u32 = 10;

fn validate_price(price: Decimal) -> Result<Decimal, AppError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::validation("Price cannot be negative"));
    }
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(AppError::validation(format!(
            "Price cannot have more than {MAX_PRICE_SCALE} decimal places"
        )));
    }
    if price >= Decimal::from(10_i64.pow(MAX_PRICE_INTEGER_DIGITS)) {
        return Err(AppError::validation("Price is too large"));
    }
    Ok(price)
}
