//! Phone contract rows and DTOs.

use itam_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `phone_contracts` table.
///
/// Unlike devices, the status does not flip when the contract is handed
/// out; the current holder lives only in the ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhoneContract {
    pub id: DbId,
    pub phone_number: String,
    pub carrier: Option<String>,
    pub company_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a phone contract. New contracts start 'active'.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhoneContract {
    pub phone_number: String,
    pub carrier: Option<String>,
    pub company_id: Option<DbId>,
}
