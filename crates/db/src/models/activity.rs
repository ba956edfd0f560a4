//! Merged activity feed rows.

use itam_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One event in the merged assignment activity feed.
///
/// Built by unioning the three ledgers; an assignment row contributes an
/// 'assigned' event and, once closed, a 'returned'/'revoked' event.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEvent {
    /// 'device', 'license', or 'phone'.
    pub resource_type: String,
    /// 'assigned', 'returned', or 'revoked'.
    pub action: String,
    pub occurred_at: Timestamp,
    pub assignment_id: DbId,
    pub resource_id: DbId,
    /// Display label: device name, license name, or phone number.
    pub resource_label: String,
    pub employee_id: DbId,
    pub employee_name: String,
    /// Who performed the action.
    pub actor: String,
}
