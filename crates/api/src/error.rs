use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use itam_core::error::AssignmentError;
use itam_db::error::EngineError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`EngineError`] for assignment/ledger failures and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent `{ "error": ..., "code": ... }` JSON bodies, so a failed
/// assignment surfaces its specific reason rather than a generic error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An assignment-engine error from `itam-db`.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A database error from sqlx (read paths outside the engine).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<AssignmentError> for AppError {
    fn from(err: AssignmentError) -> Self {
        AppError::Engine(EngineError::Assignment(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Engine(EngineError::Assignment(err)) => classify_assignment_error(err),
            AppError::Engine(EngineError::Database(err)) | AppError::Database(err) => {
                classify_sqlx_error(err)
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map the assignment taxonomy onto HTTP statuses and machine-readable
/// codes. Every 409 carries a distinct code; only `CONCURRENCY_CONFLICT`
/// is worth an automatic retry.
fn classify_assignment_error(err: &AssignmentError) -> (StatusCode, &'static str, String) {
    let message = err.to_string();
    match err {
        AssignmentError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", message),
        AssignmentError::ResourceUnavailable { .. } => {
            (StatusCode::CONFLICT, "RESOURCE_UNAVAILABLE", message)
        }
        AssignmentError::CapacityExceeded { .. } => {
            (StatusCode::CONFLICT, "CAPACITY_EXCEEDED", message)
        }
        AssignmentError::DuplicateAssignment { .. } => {
            (StatusCode::CONFLICT, "DUPLICATE_ASSIGNMENT", message)
        }
        AssignmentError::EmployeeIneligible { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "EMPLOYEE_INELIGIBLE",
            message,
        ),
        AssignmentError::NoActiveAssignment { .. } => {
            (StatusCode::CONFLICT, "NO_ACTIVE_ASSIGNMENT", message)
        }
        AssignmentError::ActiveAssignmentExists { .. } => {
            (StatusCode::CONFLICT, "ACTIVE_ASSIGNMENT_EXISTS", message)
        }
        AssignmentError::ConcurrencyConflict(_) => {
            (StatusCode::CONFLICT, "CONCURRENCY_CONFLICT", message)
        }
        AssignmentError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
