//! Repository for the `licenses` registry table.

use itam_core::error::AssignmentError;
use itam_core::status::LicenseStatus;
use itam_core::types::DbId;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::license::{CreateLicense, License};

/// Column list for `licenses` queries.
const COLUMNS: &str =
    "id, name, vendor, company_id, max_users, current_users, status, created_at, updated_at";

/// Provides registry operations for licenses.
pub struct LicenseRepo;

impl LicenseRepo {
    /// Register a license. Seat usage starts at zero; from here on the
    /// allocator owns `current_users`.
    pub async fn create(pool: &PgPool, input: &CreateLicense) -> Result<License, sqlx::Error> {
        let query = format!(
            "INSERT INTO licenses (name, vendor, company_id, max_users) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, License>(&query)
            .bind(&input.name)
            .bind(input.vendor.as_deref())
            .bind(input.company_id)
            .bind(input.max_users)
            .fetch_one(pool)
            .await
    }

    /// Find a license by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<License>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM licenses WHERE id = $1");
        sqlx::query_as::<_, License>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List licenses, optionally scoped to a company.
    pub async fn list(pool: &PgPool, company_id: Option<DbId>) -> Result<Vec<License>, sqlx::Error> {
        match company_id {
            Some(company_id) => {
                let query =
                    format!("SELECT {COLUMNS} FROM licenses WHERE company_id = $1 ORDER BY name");
                sqlx::query_as::<_, License>(&query)
                    .bind(company_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM licenses ORDER BY name");
                sqlx::query_as::<_, License>(&query).fetch_all(pool).await
            }
        }
    }

    /// Set the license lifecycle status (expired, suspended, ...).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: LicenseStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE licenses SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a license and its ledger history. Refused while any seat is
    /// still held. Returns false if the license does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, EngineError> {
        let mut tx = pool.begin().await?;

        let existing: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM licenses WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_none() {
            return Ok(false);
        }

        let active: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM license_assignments WHERE license_id = $1 AND status = 'active'",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if active.0 > 0 {
            return Err(AssignmentError::ActiveAssignmentExists {
                resource: "license",
                id,
            }
            .into());
        }

        sqlx::query("DELETE FROM licenses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}
