//! Repository for the `employees` table.

use itam_core::error::AssignmentError;
use itam_core::status::EmployeeStatus;
use itam_core::types::DbId;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::employee::{CreateEmployee, Employee};

/// Column list for `employees` queries.
const COLUMNS: &str = "id, first_name, last_name, email, status, created_at, updated_at";

/// Provides registry operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Create an employee. New employees start 'active'.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (first_name, last_name, email) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find an employee by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set an employee's lifecycle status. Returns true if a row changed.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: EmployeeStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE employees SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check, inside an open transaction, that an employee exists and may
    /// receive new assignments. Shared by all three assignment engines.
    pub async fn ensure_eligible(
        conn: &mut sqlx::PgConnection,
        employee_id: DbId,
    ) -> Result<(), EngineError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT status FROM employees WHERE id = $1")
            .bind(employee_id)
            .fetch_optional(conn)
            .await?;

        let (status,) = row.ok_or(AssignmentError::NotFound {
            entity: "Employee",
            id: employee_id,
        })?;

        if !EmployeeStatus::parse(&status)?.is_eligible() {
            return Err(AssignmentError::EmployeeIneligible {
                employee_id,
                status,
            }
            .into());
        }
        Ok(())
    }

    /// Delete an employee. Refused while any ledger still has an active
    /// assignment for them. Returns false if the employee does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, EngineError> {
        let mut tx = pool.begin().await?;

        let existing: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM employees WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_none() {
            return Ok(false);
        }

        let active: (i64,) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM device_assignments \
                      WHERE employee_id = $1 AND status = 'active') \
                  + (SELECT COUNT(*) FROM license_assignments \
                      WHERE employee_id = $1 AND status = 'active') \
                  + (SELECT COUNT(*) FROM phone_assignments \
                      WHERE employee_id = $1 AND status = 'active')",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if active.0 > 0 {
            return Err(AssignmentError::ActiveAssignmentExists {
                resource: "employee",
                id,
            }
            .into());
        }

        sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}
