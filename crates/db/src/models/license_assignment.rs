//! License assignment (seat) ledger rows and DTOs.

use itam_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `license_assignments` ledger: one seat held by one
/// employee. Several employees may hold seats on the same license, so the
/// (license, employee) pair identifies the open row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LicenseAssignment {
    pub id: DbId,
    pub license_id: DbId,
    pub employee_id: DbId,
    pub assigned_date: Timestamp,
    pub status: String,
    pub revoked_date: Option<Timestamp>,
    pub assigned_by: String,
    pub revoked_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for assigning a license seat to an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignLicense {
    pub license_id: DbId,
    pub employee_id: DbId,
    pub assigned_by: String,
    pub notes: Option<String>,
}

/// DTO for revoking an employee's seat.
#[derive(Debug, Clone, Deserialize)]
pub struct RevokeLicense {
    pub license_id: DbId,
    pub employee_id: DbId,
    pub revoked_by: String,
    pub notes: Option<String>,
}
