//! Translation of `sqlx` failures into [`AppError`].

use booking_core::error::{AppError, ErrorKind};

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps a database error, turning constraint violations into conflicts.
///
/// `context` describes the failed operation and ends up in server logs only.
pub fn map_db_error(context: &str, err: sqlx::Error) -> AppError {
    match error_code(&err).as_deref() {
        Some(UNIQUE_VIOLATION) => {
            AppError::with_source(ErrorKind::Conflict, "Email is already registered", err)
        }
        Some(FOREIGN_KEY_VIOLATION) => AppError::with_source(
            ErrorKind::Conflict,
            "Record is referenced by existing reservations",
            err,
        ),
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), err),
    }
}

/// Maps a failed reservation write, where a foreign key violation means the
/// referenced identity or service does not exist.
pub fn map_reference_error(context: &str, err: sqlx::Error) -> AppError {
    if error_code(&err).as_deref() == Some(FOREIGN_KEY_VIOLATION) {
        return AppError::with_source(
            ErrorKind::Validation,
            "Referenced identity or service does not exist",
            err,
        );
    }
    map_db_error(context, err)
}

fn error_code(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|c| c.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_stay_database_kind() {
        let err = map_db_error("Failed to list services", sqlx::Error::RowNotFound);
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(err.message, "Failed to list services");
    }

    #[test]
    fn test_reference_mapping_falls_back() {
        let err = map_reference_error("Failed to create reservation", sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, ErrorKind::Database);
    }
}
