//! PostgreSQL service repository.

use async_trait::async_trait;
use sqlx::PgPool;

use booking_core::result::AppResult;
use booking_entity::service::{CreateService, Service, UpdateService};

use super::ServiceRepository;
use crate::error::map_db_error;

/// Service repository over the `services` table.
#[derive(Debug, Clone)]
pub struct PgServiceRepository {
    pool: PgPool,
}

impl PgServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for PgServiceRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Service>> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to find service by id", e))
    }

    async fn list(&self) -> AppResult<Vec<Service>> {
        sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to list services", e))
    }

    async fn create(&self, input: &CreateService) -> AppResult<Service> {
        sqlx::query_as::<_, Service>(
            r#"INSERT INTO services (name, description, price)
            VALUES ($1, $2, $3)
            RETURNING *"#,
        )
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to create service", e))
    }

    async fn update(&self, id: i64, input: &UpdateService) -> AppResult<Option<Service>> {
        sqlx::query_as::<_, Service>(
            r#"UPDATE services SET
                name = COALESCE($2::TEXT, name),
                description = CASE WHEN $3::BOOLEAN THEN $4::TEXT ELSE description END,
                price = COALESCE($5::NUMERIC, price),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *"#,
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.description.is_some())
        .bind(input.description.as_ref().and_then(Option::as_deref))
        .bind(input.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to update service", e))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to delete service", e))?;
        Ok(result.rows_affected() > 0)
    }
}
