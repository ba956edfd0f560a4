//! Handlers for license seat operations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use itam_core::types::DbId;
use itam_db::models::license_assignment::{AssignLicense, RevokeLicense};
use itam_db::repositories::LicenseAssignmentRepo;

use crate::error::AppResult;
use crate::query::CompanyParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/assignments/license
///
/// Assign one seat to an employee. Fails with a specific reason when the
/// license is not active, the employee already holds a seat, or all seats
/// are in use.
pub async fn assign_license(
    State(state): State<AppState>,
    Json(input): Json<AssignLicense>,
) -> AppResult<impl IntoResponse> {
    let assignment = LicenseAssignmentRepo::assign(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// POST /api/v1/assignments/license/unassign
///
/// Revoke the employee's seat. The (license, employee) pair identifies the
/// open row, since several employees may hold one license.
pub async fn revoke_license(
    State(state): State<AppState>,
    Json(input): Json<RevokeLicense>,
) -> AppResult<impl IntoResponse> {
    let assignment = LicenseAssignmentRepo::revoke(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: assignment }))
}

/// GET /api/v1/assignments/licenses
///
/// Full license ledger, optionally scoped by `?company_id=`.
pub async fn list_license_assignments(
    State(state): State<AppState>,
    Query(params): Query<CompanyParams>,
) -> AppResult<impl IntoResponse> {
    let assignments = LicenseAssignmentRepo::list(&state.pool, params.company_id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

/// Seat count payload for the recount endpoint.
#[derive(Debug, serde::Serialize)]
pub struct SeatCount {
    pub license_id: DbId,
    pub current_users: i32,
}

/// POST /api/v1/licenses/{license_id}/recount-seats
///
/// Authoritative recount of active seats from the ledger. Heals a drifted
/// cache; safe to call from external reconciliation jobs at any time.
pub async fn recount_seats(
    State(state): State<AppState>,
    Path(license_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current_users = LicenseAssignmentRepo::recount_seats(&state.pool, license_id).await?;

    tracing::info!(license_id, current_users, "License seats recounted");

    Ok(Json(DataResponse {
        data: SeatCount {
            license_id,
            current_users,
        },
    }))
}
