//! Assignment engine and ledger access for phone contracts.
//!
//! A contract has at most one holder, but unlike devices its lifecycle
//! status does not flip on assignment: "held" is purely a ledger fact, so
//! the single-holder check reads the ledger under the contract row lock.

use itam_core::error::AssignmentError;
use itam_core::status::PhoneContractStatus;
use itam_core::types::DbId;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::phone_assignment::{AssignPhone, PhoneAssignment, ReturnPhone};
use crate::repositories::EmployeeRepo;

/// Column list for `phone_assignments` queries.
const COLUMNS: &str = "\
    id, phone_contract_id, employee_id, assigned_date, status, returned_date, \
    assigned_by, returned_by, notes, created_at, updated_at";

/// Provides the assignment engine and ledger reads for phone contracts.
pub struct PhoneAssignmentRepo;

impl PhoneAssignmentRepo {
    /// Assign a phone contract to an employee.
    pub async fn assign(pool: &PgPool, input: &AssignPhone) -> Result<PhoneAssignment, EngineError> {
        let mut tx = pool.begin().await?;

        let contract: Option<(String,)> =
            sqlx::query_as("SELECT status FROM phone_contracts WHERE id = $1 FOR UPDATE")
                .bind(input.phone_contract_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (status,) = contract.ok_or(AssignmentError::NotFound {
            entity: "PhoneContract",
            id: input.phone_contract_id,
        })?;

        let status = PhoneContractStatus::parse(&status)?;
        if !status.is_assignable() {
            return Err(AssignmentError::ResourceUnavailable {
                resource: "phone contract",
                id: input.phone_contract_id,
                status: status.to_string(),
            }
            .into());
        }

        EmployeeRepo::ensure_eligible(&mut *tx, input.employee_id).await?;

        let holder: Option<(DbId,)> = sqlx::query_as(
            "SELECT employee_id FROM phone_assignments \
             WHERE phone_contract_id = $1 AND status = 'active'",
        )
        .bind(input.phone_contract_id)
        .fetch_optional(&mut *tx)
        .await?;
        if let Some((holder_id,)) = holder {
            if holder_id == input.employee_id {
                return Err(AssignmentError::DuplicateAssignment {
                    resource: "phone contract",
                    id: input.phone_contract_id,
                    employee_id: input.employee_id,
                }
                .into());
            }
            return Err(AssignmentError::ResourceUnavailable {
                resource: "phone contract",
                id: input.phone_contract_id,
                status: "assigned".to_string(),
            }
            .into());
        }

        let query = format!(
            "INSERT INTO phone_assignments (phone_contract_id, employee_id, assigned_by, notes) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, PhoneAssignment>(&query)
            .bind(input.phone_contract_id)
            .bind(input.employee_id)
            .bind(&input.assigned_by)
            .bind(input.notes.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            phone_contract_id = input.phone_contract_id,
            employee_id = input.employee_id,
            assignment_id = assignment.id,
            "Phone contract assigned"
        );
        Ok(assignment)
    }

    /// Close the active assignment for a phone contract. The contract's
    /// own status is untouched.
    pub async fn unassign(
        pool: &PgPool,
        input: &ReturnPhone,
    ) -> Result<PhoneAssignment, EngineError> {
        let mut tx = pool.begin().await?;

        let contract: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM phone_contracts WHERE id = $1 FOR UPDATE")
                .bind(input.phone_contract_id)
                .fetch_optional(&mut *tx)
                .await?;
        if contract.is_none() {
            return Err(AssignmentError::NotFound {
                entity: "PhoneContract",
                id: input.phone_contract_id,
            }
            .into());
        }

        let open: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM phone_assignments \
             WHERE phone_contract_id = $1 AND status = 'active' FOR UPDATE",
        )
        .bind(input.phone_contract_id)
        .fetch_optional(&mut *tx)
        .await?;
        let (assignment_id,) = open.ok_or(AssignmentError::NoActiveAssignment {
            resource: "phone contract",
            id: input.phone_contract_id,
        })?;

        let query = format!(
            "UPDATE phone_assignments \
             SET status = 'returned', returned_date = now(), returned_by = $2, \
                 notes = COALESCE($3, notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, PhoneAssignment>(&query)
            .bind(assignment_id)
            .bind(&input.returned_by)
            .bind(input.notes.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            phone_contract_id = input.phone_contract_id,
            assignment_id = assignment.id,
            "Phone contract returned"
        );
        Ok(assignment)
    }

    /// The contract's current holder, if any.
    pub async fn find_active_by_contract(
        pool: &PgPool,
        phone_contract_id: DbId,
    ) -> Result<Option<PhoneAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM phone_assignments \
             WHERE phone_contract_id = $1 AND status = 'active'"
        );
        sqlx::query_as::<_, PhoneAssignment>(&query)
            .bind(phone_contract_id)
            .fetch_optional(pool)
            .await
    }

    /// Full phone ledger, newest first. Optionally scoped to a company
    /// through the contract's `company_id`.
    pub async fn list(
        pool: &PgPool,
        company_id: Option<DbId>,
    ) -> Result<Vec<PhoneAssignment>, sqlx::Error> {
        match company_id {
            Some(company_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM phone_assignments \
                     WHERE phone_contract_id IN \
                       (SELECT id FROM phone_contracts WHERE company_id = $1) \
                     ORDER BY assigned_date DESC, id DESC"
                );
                sqlx::query_as::<_, PhoneAssignment>(&query)
                    .bind(company_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM phone_assignments \
                     ORDER BY assigned_date DESC, id DESC"
                );
                sqlx::query_as::<_, PhoneAssignment>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Active phone assignments held by one employee.
    pub async fn list_active_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<PhoneAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM phone_assignments \
             WHERE employee_id = $1 AND status = 'active' \
             ORDER BY assigned_date"
        );
        sqlx::query_as::<_, PhoneAssignment>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }
}
