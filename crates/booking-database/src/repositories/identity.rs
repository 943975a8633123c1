//! PostgreSQL identity repository.

use async_trait::async_trait;
use sqlx::PgPool;

use booking_core::result::AppResult;
use booking_entity::identity::{CreateIdentity, Identity, UpdateIdentity};

use super::IdentityRepository;
use crate::error::map_db_error;

/// Identity repository over the `identities` table.
#[derive(Debug, Clone)]
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    /// Create a new identity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityRepository for PgIdentityRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Identity>> {
        sqlx::query_as::<_, Identity>("SELECT * FROM identities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to find identity by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        sqlx::query_as::<_, Identity>("SELECT * FROM identities WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to find identity by email", e))
    }

    async fn list(&self) -> AppResult<Vec<Identity>> {
        sqlx::query_as::<_, Identity>("SELECT * FROM identities ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to list identities", e))
    }

    async fn create(&self, input: &CreateIdentity) -> AppResult<Identity> {
        sqlx::query_as::<_, Identity>(
            r#"INSERT INTO identities (name, email, password_hash, salt)
            VALUES ($1, $2, $3, $4)
            RETURNING *"#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.credential.password_hash())
        .bind(input.credential.salt())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to create identity", e))
    }

    async fn update(&self, id: i64, input: &UpdateIdentity) -> AppResult<Option<Identity>> {
        // A replaced credential always replaces the salt too, clearing it for
        // self-salting hashes.
        let replace_credential = input.credential.is_some();
        let (hash, salt) = match &input.credential {
            Some(c) => (Some(c.password_hash()), c.salt()),
            None => (None, None),
        };

        sqlx::query_as::<_, Identity>(
            r#"UPDATE identities SET
                name = COALESCE($2::TEXT, name),
                email = COALESCE($3::TEXT, email),
                password_hash = COALESCE($4::TEXT, password_hash),
                salt = CASE WHEN $5::BOOLEAN THEN $6::TEXT ELSE salt END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *"#,
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.email.as_deref())
        .bind(hash)
        .bind(replace_credential)
        .bind(salt)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to update identity", e))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM identities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to delete identity", e))?;
        Ok(result.rows_affected() > 0)
    }
}
