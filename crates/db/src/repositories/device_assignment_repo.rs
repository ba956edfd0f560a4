//! Assignment engine and ledger access for devices.
//!
//! The ledger row and the device's cached status are one logical unit:
//! every mutation here locks the device row, re-validates preconditions on
//! the locked state, and commits both writes or neither.

use itam_core::error::AssignmentError;
use itam_core::status::DeviceStatus;
use itam_core::types::DbId;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::device_assignment::{AssignDevice, DeviceAssignment, UnassignDevice};
use crate::repositories::EmployeeRepo;

/// Column list for `device_assignments` queries.
const COLUMNS: &str = "\
    id, device_id, employee_id, assigned_date, status, returned_date, \
    assigned_by, returned_by, notes, created_at, updated_at";

/// Provides the assignment engine and ledger reads for devices.
pub struct DeviceAssignmentRepo;

impl DeviceAssignmentRepo {
    /// Assign a device to an employee.
    ///
    /// Two concurrent calls serialize on the device row lock; the loser
    /// re-reads `status = 'assigned'` and fails with `ResourceUnavailable`.
    pub async fn assign(pool: &PgPool, input: &AssignDevice) -> Result<DeviceAssignment, EngineError> {
        let mut tx = pool.begin().await?;

        let device: Option<(String,)> =
            sqlx::query_as("SELECT status FROM devices WHERE id = $1 FOR UPDATE")
                .bind(input.device_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (status,) = device.ok_or(AssignmentError::NotFound {
            entity: "Device",
            id: input.device_id,
        })?;

        let status = DeviceStatus::parse(&status)?;
        if !status.is_assignable() {
            return Err(AssignmentError::ResourceUnavailable {
                resource: "device",
                id: input.device_id,
                status: status.to_string(),
            }
            .into());
        }

        EmployeeRepo::ensure_eligible(&mut *tx, input.employee_id).await?;

        let query = format!(
            "INSERT INTO device_assignments (device_id, employee_id, assigned_by, notes) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, DeviceAssignment>(&query)
            .bind(input.device_id)
            .bind(input.employee_id)
            .bind(&input.assigned_by)
            .bind(input.notes.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE devices SET status = $2 WHERE id = $1")
            .bind(input.device_id)
            .bind(DeviceStatus::Assigned.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            device_id = input.device_id,
            employee_id = input.employee_id,
            assignment_id = assignment.id,
            "Device assigned"
        );
        Ok(assignment)
    }

    /// Close the active assignment for a device.
    ///
    /// The cached status always returns to 'available', even if the device
    /// carried a non-default status before it was assigned.
    pub async fn unassign(
        pool: &PgPool,
        input: &UnassignDevice,
    ) -> Result<DeviceAssignment, EngineError> {
        let mut tx = pool.begin().await?;

        // Lock the device row first: an unknown device is NotFound, not
        // NoActiveAssignment, and the lock serializes against assign.
        let device: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM devices WHERE id = $1 FOR UPDATE")
                .bind(input.device_id)
                .fetch_optional(&mut *tx)
                .await?;
        if device.is_none() {
            return Err(AssignmentError::NotFound {
                entity: "Device",
                id: input.device_id,
            }
            .into());
        }

        let open: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM device_assignments \
             WHERE device_id = $1 AND status = 'active' FOR UPDATE",
        )
        .bind(input.device_id)
        .fetch_optional(&mut *tx)
        .await?;
        let (assignment_id,) = open.ok_or(AssignmentError::NoActiveAssignment {
            resource: "device",
            id: input.device_id,
        })?;

        let query = format!(
            "UPDATE device_assignments \
             SET status = 'returned', returned_date = now(), returned_by = $2, \
                 notes = COALESCE($3, notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, DeviceAssignment>(&query)
            .bind(assignment_id)
            .bind(&input.returned_by)
            .bind(input.notes.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE devices SET status = $2 WHERE id = $1")
            .bind(input.device_id)
            .bind(DeviceStatus::Available.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            device_id = input.device_id,
            assignment_id = assignment.id,
            "Device returned"
        );
        Ok(assignment)
    }

    /// The device's current holder, if any.
    pub async fn find_active_by_device(
        pool: &PgPool,
        device_id: DbId,
    ) -> Result<Option<DeviceAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM device_assignments \
             WHERE device_id = $1 AND status = 'active'"
        );
        sqlx::query_as::<_, DeviceAssignment>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// Full device ledger, newest first. Optionally scoped to a company
    /// through the device's `company_id`.
    pub async fn list(
        pool: &PgPool,
        company_id: Option<DbId>,
    ) -> Result<Vec<DeviceAssignment>, sqlx::Error> {
        match company_id {
            Some(company_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM device_assignments \
                     WHERE device_id IN (SELECT id FROM devices WHERE company_id = $1) \
                     ORDER BY assigned_date DESC, id DESC"
                );
                sqlx::query_as::<_, DeviceAssignment>(&query)
                    .bind(company_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM device_assignments \
                     ORDER BY assigned_date DESC, id DESC"
                );
                sqlx::query_as::<_, DeviceAssignment>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Active device assignments held by one employee.
    pub async fn list_active_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<DeviceAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM device_assignments \
             WHERE employee_id = $1 AND status = 'active' \
             ORDER BY assigned_date"
        );
        sqlx::query_as::<_, DeviceAssignment>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }
}
