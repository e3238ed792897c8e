pub mod manager;
pub mod models;
pub mod ratings;
pub mod stores;
pub mod users;

pub use manager::DatabaseError;

use crate::error::ApiError;

/// Map a unique-constraint violation to Conflict; anything else takes the
/// generic storage-failure path.
pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> ApiError {
    if let sqlx::Error::Database(db_err) = &err {
        if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return ApiError::conflict(message);
        }
    }
    err.into()
}

/// Map a foreign-key violation (referenced entity absent) to a 400
pub(crate) fn bad_request_on_fk(err: sqlx::Error, message: &str) -> ApiError {
    if let sqlx::Error::Database(db_err) = &err {
        if matches!(db_err.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) {
            return ApiError::bad_request(message);
        }
    }
    err.into()
}
