//! PostgreSQL reservation repository.

use async_trait::async_trait;
use sqlx::PgPool;

use booking_core::result::AppResult;
use booking_entity::reservation::{
    CreateReservation, Reservation, ReservationFilter, UpdateReservation,
};

use super::ReservationRepository;
use crate::error::{map_db_error, map_reference_error};

/// Reservation repository over the `reservations` table.
#[derive(Debug, Clone)]
pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to find reservation by id", e))
    }

    async fn list(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            r#"SELECT * FROM reservations
            WHERE ($1::BIGINT IS NULL OR identity_id = $1)
              AND ($2::BIGINT IS NULL OR service_id = $2)
              AND ($3::TIMESTAMPTZ IS NULL OR reserved_at >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR reserved_at < $4)
            ORDER BY reserved_at, id"#,
        )
        .bind(filter.identity_id)
        .bind(filter.service_id)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list reservations", e))
    }

    async fn create(&self, input: &CreateReservation) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            r#"INSERT INTO reservations (identity_id, service_id, reserved_at, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *"#,
        )
        .bind(input.identity_id)
        .bind(input.service_id)
        .bind(input.reserved_at)
        .bind(input.notes.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_reference_error("Failed to create reservation", e))
    }

    async fn update(
        &self,
        id: i64,
        input: &UpdateReservation,
    ) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            r#"UPDATE reservations SET
                identity_id = COALESCE($2::BIGINT, identity_id),
                service_id = COALESCE($3::BIGINT, service_id),
                reserved_at = COALESCE($4::TIMESTAMPTZ, reserved_at),
                notes = CASE WHEN $5::BOOLEAN THEN $6::TEXT ELSE notes END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *"#,
        )
        .bind(id)
        .bind(input.identity_id)
        .bind(input.service_id)
        .bind(input.reserved_at)
        .bind(input.notes.is_some())
        .bind(input.notes.as_ref().and_then(Option::as_deref))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_reference_error("Failed to update reservation", e))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to delete reservation", e))?;
        Ok(result.rows_affected() > 0)
    }
}
