//! Error type for the assignment engine and ledger repositories.

use itam_core::error::AssignmentError;

/// Unique constraint violation.
const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";
/// Could not serialize access due to concurrent update.
const SQLSTATE_SERIALIZATION_FAILURE: &str = "40001";
/// Deadlock detected.
const SQLSTATE_DEADLOCK_DETECTED: &str = "40P01";

/// Error returned by assignment/ledger operations.
///
/// Domain failures carry the [`AssignmentError`] taxonomy; everything else
/// is a storage error. Storage-level race signals (a `uq_*` unique index
/// hit, a serialization failure) are folded into the retryable
/// [`AssignmentError::ConcurrencyConflict`] class on conversion.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

/// Convenience alias for engine operation results.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<sqlx::Error> for EngineError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some(SQLSTATE_UNIQUE_VIOLATION) => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint.starts_with("uq_") {
                        return EngineError::Assignment(AssignmentError::ConcurrencyConflict(
                            format!("unique constraint {constraint}"),
                        ));
                    }
                }
                Some(SQLSTATE_SERIALIZATION_FAILURE) | Some(SQLSTATE_DEADLOCK_DETECTED) => {
                    return EngineError::Assignment(AssignmentError::ConcurrencyConflict(
                        "transaction serialization failure".to_string(),
                    ));
                }
                _ => {}
            }
        }
        EngineError::Database(err)
    }
}
