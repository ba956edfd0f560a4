//! Handlers for device assignment operations.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use itam_db::models::device_assignment::{AssignDevice, UnassignDevice};
use itam_db::repositories::DeviceAssignmentRepo;

use crate::error::AppResult;
use crate::query::CompanyParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/assignments/device
///
/// Assign a device to an employee. The device must be 'available' and the
/// employee 'active'.
pub async fn assign_device(
    State(state): State<AppState>,
    Json(input): Json<AssignDevice>,
) -> AppResult<impl IntoResponse> {
    let assignment = DeviceAssignmentRepo::assign(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// POST /api/v1/assignments/device/unassign
///
/// Close the device's active assignment. The device's cached status always
/// returns to 'available'.
pub async fn unassign_device(
    State(state): State<AppState>,
    Json(input): Json<UnassignDevice>,
) -> AppResult<impl IntoResponse> {
    let assignment = DeviceAssignmentRepo::unassign(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: assignment }))
}

/// GET /api/v1/assignments/devices
///
/// Full device ledger for reconciliation/auditing, optionally scoped by
/// `?company_id=`.
pub async fn list_device_assignments(
    State(state): State<AppState>,
    Query(params): Query<CompanyParams>,
) -> AppResult<impl IntoResponse> {
    let assignments = DeviceAssignmentRepo::list(&state.pool, params.company_id).await?;
    Ok(Json(DataResponse { data: assignments }))
}
