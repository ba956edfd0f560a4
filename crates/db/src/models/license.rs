//! License rows and DTOs.

use itam_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `licenses` table.
///
/// `current_users` must always equal the count of this license's active
/// ledger rows; it is rewritten from the ledger inside every assignment
/// transaction and healed by `recount_seats`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct License {
    pub id: DbId,
    pub name: String,
    pub vendor: Option<String>,
    pub company_id: Option<DbId>,
    pub max_users: i32,
    pub current_users: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a license.
///
/// Deliberately has no seat-count field: `current_users` starts at zero and
/// is owned by the allocator from then on.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLicense {
    pub name: String,
    pub vendor: Option<String>,
    pub company_id: Option<DbId>,
    pub max_users: i32,
}
