//! Handlers for phone contract assignment operations.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use itam_db::models::phone_assignment::{AssignPhone, ReturnPhone};
use itam_db::repositories::PhoneAssignmentRepo;

use crate::error::AppResult;
use crate::query::CompanyParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/assignments/phone
///
/// Assign a phone contract to an employee. The contract must be 'active'
/// and not currently held.
pub async fn assign_phone(
    State(state): State<AppState>,
    Json(input): Json<AssignPhone>,
) -> AppResult<impl IntoResponse> {
    let assignment = PhoneAssignmentRepo::assign(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// POST /api/v1/assignments/phone/return
///
/// Close the contract's active assignment. The contract's own status is
/// unaffected.
pub async fn return_phone(
    State(state): State<AppState>,
    Json(input): Json<ReturnPhone>,
) -> AppResult<impl IntoResponse> {
    let assignment = PhoneAssignmentRepo::unassign(&state.pool, &input).await?;
    Ok(Json(DataResponse { data: assignment }))
}

/// GET /api/v1/assignments/phones
///
/// Full phone ledger, optionally scoped by `?company_id=`.
pub async fn list_phone_assignments(
    State(state): State<AppState>,
    Query(params): Query<CompanyParams>,
) -> AppResult<impl IntoResponse> {
    let assignments = PhoneAssignmentRepo::list(&state.pool, params.company_id).await?;
    Ok(Json(DataResponse { data: assignments }))
}
