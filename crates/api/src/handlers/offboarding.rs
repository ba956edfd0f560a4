//! Handlers for employee offboarding.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use itam_core::offboarding::OffboardItem;
use itam_core::types::DbId;

use crate::engine::offboarding;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Recorded as the actor when the request does not name one.
const DEFAULT_PERFORMED_BY: &str = "offboarding";

/// Request payload for an offboarding batch.
#[derive(Debug, Deserialize)]
pub struct OffboardRequest {
    pub employee_id: DbId,
    /// The subset of the employee's active assignments to terminate.
    pub items: Vec<OffboardItem>,
    pub performed_by: Option<String>,
}

/// POST /api/v1/assignments/offboard
///
/// Terminate the selected assignments for one employee. Always answers 200
/// with a per-item report -- partial failure is a result, not an error --
/// so callers must inspect `failed`/`failures` even on success.
pub async fn offboard(
    State(state): State<AppState>,
    Json(input): Json<OffboardRequest>,
) -> AppResult<impl IntoResponse> {
    let item_timeout = Duration::from_secs(state.config.offboard_item_timeout_secs);

    let outcome = offboarding::offboard(
        &state.pool,
        input.employee_id,
        &input.items,
        input.performed_by.as_deref().unwrap_or(DEFAULT_PERFORMED_BY),
        item_timeout,
    )
    .await?;

    tracing::info!(
        employee_id = input.employee_id,
        succeeded = outcome.report.succeeded,
        failed = outcome.report.failed,
        employee_deactivated = outcome.employee_deactivated,
        "Offboarding batch completed"
    );

    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/assignments/employee/{employee_id}/active
///
/// Every active assignment the employee currently holds, across all three
/// resource types -- the selectable item list for an offboarding batch.
pub async fn list_active_for_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let items = offboarding::active_items(&state.pool, employee_id).await?;
    Ok(Json(DataResponse { data: items }))
}
