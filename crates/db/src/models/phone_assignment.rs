//! Phone assignment ledger rows and DTOs.

use itam_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `phone_assignments` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhoneAssignment {
    pub id: DbId,
    pub phone_contract_id: DbId,
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

/// DTO for assigning a phone contract to an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignPhone {
    pub phone_contract_id: DbId,
    pub employee_id: DbId,
    pub assigned_by: String,
    pub notes: Option<String>,
}

/// DTO for returning a phone contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnPhone {
    pub phone_contract_id: DbId,
    pub returned_by: String,
    pub notes: Option<String>,
}
