//! Device rows and DTOs.

use itam_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `devices` table.
///
/// `status` is a cached view of the ledger for the assigned/available
/// transition; the assignment engine is the only writer on that path.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Device {
    pub id: DbId,
    pub name: String,
    pub serial_number: String,
    pub company_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a device. New devices start 'available'.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDevice {
    pub name: String,
    pub serial_number: String,
    pub company_id: Option<DbId>,
}
