//! Shared query parameter types for API handlers.

use itam_core::types::DbId;
use serde::Deserialize;

/// Feed limit parameter (`?limit=`). Clamped in the repository layer.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// Company scope parameter (`?company_id=`) for ledger listings.
#[derive(Debug, Deserialize)]
pub struct CompanyParams {
    pub company_id: Option<DbId>,
}
