//! Reservation list filtering.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use booking_core::error::AppError;

use super::model::Reservation;

/// Optional constraints on a reservation listing. `from` is inclusive and
/// `to` exclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationFilter {
    pub identity_id: Option<i64>,
    pub service_id: Option<i64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ReservationFilter {
    /// Rejects an empty or inverted date range.
    pub fn validate(&self) -> Result<(), AppError> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from >= to {
                return Err(AppError::validation("'from' must be earlier than 'to'"));
            }
        }
        Ok(())
    }

    /// Whether a reservation satisfies every present constraint.
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.identity_id.is_none_or(|id| reservation.identity_id == id)
            && self.service_id.is_none_or(|id| reservation.service_id == id)
            && self.from.is_none_or(|from| reservation.reserved_at >= from)
            && self.to.is_none_or(|to| reservation.reserved_at < to)
    }
}
