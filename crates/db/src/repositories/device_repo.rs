//! Repository for the `devices` registry table.

use itam_core::error::AssignmentError;
use itam_core::status::DeviceStatus;
use itam_core::types::DbId;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::device::{CreateDevice, Device};

/// Column list for `devices` queries.
const COLUMNS: &str = "id, name, serial_number, company_id, status, created_at, updated_at";

/// Provides registry operations for devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Register a device. New devices start 'available'.
    pub async fn create(pool: &PgPool, input: &CreateDevice) -> Result<Device, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices (name, serial_number, company_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(&input.name)
            .bind(&input.serial_number)
            .bind(input.company_id)
            .fetch_one(pool)
            .await
    }

    /// Find a device by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE id = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List devices, optionally scoped to a company.
    pub async fn list(pool: &PgPool, company_id: Option<DbId>) -> Result<Vec<Device>, sqlx::Error> {
        match company_id {
            Some(company_id) => {
                let query =
                    format!("SELECT {COLUMNS} FROM devices WHERE company_id = $1 ORDER BY name");
                sqlx::query_as::<_, Device>(&query)
                    .bind(company_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM devices ORDER BY name");
                sqlx::query_as::<_, Device>(&query).fetch_all(pool).await
            }
        }
    }

    /// Set the cached lifecycle status directly (maintenance, retired, ...).
    ///
    /// The assigned/available transition belongs to the assignment engine;
    /// this is for the registry's own lifecycle edits.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: DeviceStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE devices SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a device and its ledger history. Refused while an active
    /// assignment references it. Returns false if the device does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, EngineError> {
        let mut tx = pool.begin().await?;

        // Lock the row so a concurrent assign cannot slip in under the check.
        let existing: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM devices WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_none() {
            return Ok(false);
        }

        let active: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM device_assignments WHERE device_id = $1 AND status = 'active'",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if active.0 > 0 {
            return Err(AssignmentError::ActiveAssignmentExists {
                resource: "device",
                id,
            }
            .into());
        }

        sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}
