use crate::types::DbId;

/// Failure taxonomy for assignment and allocation operations.
///
/// Every variant except [`ConcurrencyConflict`](Self::ConcurrencyConflict)
/// is a precondition violation: retrying the same call verbatim will fail
/// the same way. A concurrency conflict means the caller lost a race on a
/// capacity or uniqueness check and may safely retry.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{resource} {id} is not assignable in status '{status}'")]
    ResourceUnavailable {
        resource: &'static str,
        id: DbId,
        status: String,
    },

    #[error("license {license_id} has no available seats (all {max_users} in use)")]
    CapacityExceeded { license_id: DbId, max_users: i32 },

    #[error("employee {employee_id} already holds {resource} {id}")]
    DuplicateAssignment {
        resource: &'static str,
        id: DbId,
        employee_id: DbId,
    },

    #[error("employee {employee_id} is '{status}' and cannot receive assignments")]
    EmployeeIneligible { employee_id: DbId, status: String },

    #[error("{resource} {id} has no active assignment to close")]
    NoActiveAssignment { resource: &'static str, id: DbId },

    #[error("{resource} {id} still has active assignments")]
    ActiveAssignmentExists { resource: &'static str, id: DbId },

    #[error("lost a concurrent race: {0}")]
    ConcurrencyConflict(String),

    #[error("validation failed: {0}")]
    Validation(String),
}

impl AssignmentError {
    /// True for the one error class a caller may retry verbatim.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AssignmentError::ConcurrencyConflict(_))
    }
}
