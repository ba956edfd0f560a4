//! Assignment engine and ledger access for license seats.
//!
//! The license row lock is what makes the capacity check safe: two
//! concurrent assigns against the same license serialize on `FOR UPDATE`,
//! so the second sees the first's committed ledger row when it counts
//! active seats. The cached `current_users` is rewritten from the ledger
//! in the same transaction, never incremented blindly.

use itam_core::error::AssignmentError;
use itam_core::seats;
use itam_core::status::LicenseStatus;
use itam_core::types::DbId;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::license_assignment::{AssignLicense, LicenseAssignment, RevokeLicense};
use crate::repositories::EmployeeRepo;

/// Column list for `license_assignments` queries.
const COLUMNS: &str = "\
    id, license_id, employee_id, assigned_date, status, revoked_date, \
    assigned_by, revoked_by, notes, created_at, updated_at";

/// Rewrites the cached seat count from the ledger.
const RECOUNT_SQL: &str = "\
    UPDATE licenses \
    SET current_users = (SELECT COUNT(*) FROM license_assignments \
                          WHERE license_id = $1 AND status = 'active') \
    WHERE id = $1";

/// Provides the seat allocator and ledger reads for licenses.
pub struct LicenseAssignmentRepo;

impl LicenseAssignmentRepo {
    /// Assign one seat on a license to an employee.
    pub async fn assign(
        pool: &PgPool,
        input: &AssignLicense,
    ) -> Result<LicenseAssignment, EngineError> {
        let mut tx = pool.begin().await?;

        let license: Option<(String, i32)> =
            sqlx::query_as("SELECT status, max_users FROM licenses WHERE id = $1 FOR UPDATE")
                .bind(input.license_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (status, max_users) = license.ok_or(AssignmentError::NotFound {
            entity: "License",
            id: input.license_id,
        })?;
        let status = LicenseStatus::parse(&status)?;

        EmployeeRepo::ensure_eligible(&mut *tx, input.employee_id).await?;

        // Duplicate before capacity: already holding a seat is not a
        // capacity problem.
        let held: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM license_assignments \
              WHERE license_id = $1 AND employee_id = $2 AND status = 'active')",
        )
        .bind(input.license_id)
        .bind(input.employee_id)
        .fetch_one(&mut *tx)
        .await?;
        if held.0 {
            return Err(AssignmentError::DuplicateAssignment {
                resource: "license",
                id: input.license_id,
                employee_id: input.employee_id,
            }
            .into());
        }

        let active: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM license_assignments \
             WHERE license_id = $1 AND status = 'active'",
        )
        .bind(input.license_id)
        .fetch_one(&mut *tx)
        .await?;
        seats::ensure_seat_available(input.license_id, status, active.0, max_users)?;

        let query = format!(
            "INSERT INTO license_assignments (license_id, employee_id, assigned_by, notes) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, LicenseAssignment>(&query)
            .bind(input.license_id)
            .bind(input.employee_id)
            .bind(&input.assigned_by)
            .bind(input.notes.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(RECOUNT_SQL)
            .bind(input.license_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            license_id = input.license_id,
            employee_id = input.employee_id,
            assignment_id = assignment.id,
            "License seat assigned"
        );
        Ok(assignment)
    }

    /// Revoke the employee's seat on a license.
    pub async fn revoke(
        pool: &PgPool,
        input: &RevokeLicense,
    ) -> Result<LicenseAssignment, EngineError> {
        let mut tx = pool.begin().await?;

        let license: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM licenses WHERE id = $1 FOR UPDATE")
                .bind(input.license_id)
                .fetch_optional(&mut *tx)
                .await?;
        if license.is_none() {
            return Err(AssignmentError::NotFound {
                entity: "License",
                id: input.license_id,
            }
            .into());
        }

        let open: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM license_assignments \
             WHERE license_id = $1 AND employee_id = $2 AND status = 'active' FOR UPDATE",
        )
        .bind(input.license_id)
        .bind(input.employee_id)
        .fetch_optional(&mut *tx)
        .await?;
        let (assignment_id,) = open.ok_or(AssignmentError::NoActiveAssignment {
            resource: "license",
            id: input.license_id,
        })?;

        let query = format!(
            "UPDATE license_assignments \
             SET status = 'revoked', revoked_date = now(), revoked_by = $2, \
                 notes = COALESCE($3, notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, LicenseAssignment>(&query)
            .bind(assignment_id)
            .bind(&input.revoked_by)
            .bind(input.notes.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(RECOUNT_SQL)
            .bind(input.license_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            license_id = input.license_id,
            employee_id = input.employee_id,
            assignment_id = assignment.id,
            "License seat revoked"
        );
        Ok(assignment)
    }

    /// Authoritative seat recount from the ledger. Heals a drifted cache
    /// and returns the true count.
    pub async fn recount_seats(pool: &PgPool, license_id: DbId) -> Result<i32, EngineError> {
        let mut tx = pool.begin().await?;

        let license: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM licenses WHERE id = $1 FOR UPDATE")
                .bind(license_id)
                .fetch_optional(&mut *tx)
                .await?;
        if license.is_none() {
            return Err(AssignmentError::NotFound {
                entity: "License",
                id: license_id,
            }
            .into());
        }

        sqlx::query(RECOUNT_SQL)
            .bind(license_id)
            .execute(&mut *tx)
            .await?;

        let count: (i32,) = sqlx::query_as("SELECT current_users FROM licenses WHERE id = $1")
            .bind(license_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(count.0)
    }

    /// The employee's open seat on a license, if any.
    pub async fn find_active_for_pair(
        pool: &PgPool,
        license_id: DbId,
        employee_id: DbId,
    ) -> Result<Option<LicenseAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM license_assignments \
             WHERE license_id = $1 AND employee_id = $2 AND status = 'active'"
        );
        sqlx::query_as::<_, LicenseAssignment>(&query)
            .bind(license_id)
            .bind(employee_id)
            .fetch_optional(pool)
            .await
    }

    /// Full license ledger, newest first. Optionally scoped to a company
    /// through the license's `company_id`.
    pub async fn list(
        pool: &PgPool,
        company_id: Option<DbId>,
    ) -> Result<Vec<LicenseAssignment>, sqlx::Error> {
        match company_id {
            Some(company_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM license_assignments \
                     WHERE license_id IN (SELECT id FROM licenses WHERE company_id = $1) \
                     ORDER BY assigned_date DESC, id DESC"
                );
                sqlx::query_as::<_, LicenseAssignment>(&query)
                    .bind(company_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM license_assignments \
                     ORDER BY assigned_date DESC, id DESC"
                );
                sqlx::query_as::<_, LicenseAssignment>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Active seats held by one employee.
    pub async fn list_active_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<LicenseAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM license_assignments \
             WHERE employee_id = $1 AND status = 'active' \
             ORDER BY assigned_date"
        );
        sqlx::query_as::<_, LicenseAssignment>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }
}
