//! Repository for the `phone_contracts` registry table.

use itam_core::error::AssignmentError;
use itam_core::status::PhoneContractStatus;
use itam_core::types::DbId;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::phone_contract::{CreatePhoneContract, PhoneContract};

/// Column list for `phone_contracts` queries.
const COLUMNS: &str = "id, phone_number, carrier, company_id, status, created_at, updated_at";

/// Provides registry operations for phone contracts.
pub struct PhoneContractRepo;

impl PhoneContractRepo {
    /// Register a phone contract. New contracts start 'active'.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePhoneContract,
    ) -> Result<PhoneContract, sqlx::Error> {
        let query = format!(
            "INSERT INTO phone_contracts (phone_number, carrier, company_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhoneContract>(&query)
            .bind(&input.phone_number)
            .bind(input.carrier.as_deref())
            .bind(input.company_id)
            .fetch_one(pool)
            .await
    }

    /// Find a phone contract by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PhoneContract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM phone_contracts WHERE id = $1");
        sqlx::query_as::<_, PhoneContract>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List phone contracts, optionally scoped to a company.
    pub async fn list(
        pool: &PgPool,
        company_id: Option<DbId>,
    ) -> Result<Vec<PhoneContract>, sqlx::Error> {
        match company_id {
            Some(company_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM phone_contracts WHERE company_id = $1 \
                     ORDER BY phone_number"
                );
                sqlx::query_as::<_, PhoneContract>(&query)
                    .bind(company_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM phone_contracts ORDER BY phone_number");
                sqlx::query_as::<_, PhoneContract>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Set the contract lifecycle status (suspended, cancelled, ...).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: PhoneContractStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE phone_contracts SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a contract and its ledger history. Refused while someone
    /// still holds it. Returns false if the contract does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, EngineError> {
        let mut tx = pool.begin().await?;

        let existing: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM phone_contracts WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_none() {
            return Ok(false);
        }

        let active: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM phone_assignments \
             WHERE phone_contract_id = $1 AND status = 'active'",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if active.0 > 0 {
            return Err(AssignmentError::ActiveAssignmentExists {
                resource: "phone contract",
                id,
            }
            .into());
        }

        sqlx::query("DELETE FROM phone_contracts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}
