//! Device assignment ledger rows and DTOs.

use itam_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `device_assignments` ledger.
///
/// One row per assignment lifecycle: created 'active', closed 'returned'
/// with a termination date. Rows are never deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeviceAssignment {
    pub id: DbId,
    pub device_id: DbId,
    pub employee_id: DbId,
    pub assigned_date: Timestamp,
    pub status: String,
    pub returned_date: Option<Timestamp>,
    pub assigned_by: String,
    pub returned_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for assigning a device to an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignDevice {
    pub device_id: DbId,
    pub employee_id: DbId,
    pub assigned_by: String,
    pub notes: Option<String>,
}

/// DTO for returning a device.
#[derive(Debug, Clone, Deserialize)]
pub struct UnassignDevice {
    pub device_id: DbId,
    pub returned_by: String,
    pub notes: Option<String>,
}
