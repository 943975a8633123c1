//! Reservation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A booking of one service by one identity at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Assigned by persistence on creation.
    pub id: i64,
    /// The identity holding the reservation.
    pub identity_id: i64,
    /// The reserved service.
    pub service_id: i64,
    /// Reserved time, always UTC.
    pub reserved_at: DateTime<Utc>,
    /// Optional notes from the client.
    pub notes: Option<String>,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a reservation.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub identity_id: i64,
    pub service_id: i64,
    pub reserved_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Partial update for a reservation.
///
/// `notes` is `None` to keep the stored value and `Some(None)` to clear it.
#[derive(Debug, Clone, Default)]
pub struct UpdateReservation {
    pub identity_id: Option<i64>,
    pub service_id: Option<i64>,
    pub reserved_at: Option<DateTime<Utc>>,
    pub notes: Option<Option<String>>,
}

impl UpdateReservation {
    /// Applies this update to an in-memory reservation.
    pub fn apply_to(&self, reservation: &mut Reservation, now: DateTime<Utc>) {
        if let Some(identity_id) = self.identity_id {
            reservation.identity_id = identity_id;
        }
        if let Some(service_id) = self.service_id {
            reservation.service_id = service_id;
        }
        if let Some(reserved_at) = self.reserved_at {
            reservation.reserved_at = reserved_at;
        }
        if let Some(notes) = &self.notes {
            reservation.notes.clone_from(notes);
        }
        reservation.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation() -> Reservation {
        let now = Utc::now();
        Reservation {
            id: 1,
            identity_id: 1,
            service_id: 1,
            reserved_at: now,
            notes: Some("Window seat".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_absent_notes_are_kept() {
        let mut r = reservation();
        UpdateReservation::default().apply_to(&mut r, Utc::now());
        assert_eq!(r.notes.as_deref(), Some("Window seat"));
    }

    #[test]
    fn test_null_notes_clear() {
        let mut r = reservation();
        let update = UpdateReservation {
            notes: Some(None),
            ..Default::default()
        };
        update.apply_to(&mut r, Utc::now());
        assert!(r.notes.is_none());
    }
}
