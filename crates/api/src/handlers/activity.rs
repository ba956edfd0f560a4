//! Handler for the merged assignment activity feed.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use itam_db::repositories::ActivityRepo;

use crate::error::AppResult;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/assignments/activity?limit=N
///
/// Reverse-chronological assignment events across all three ledgers, each
/// tagged with resource type and action. Recomputed per call; no cursor.
pub async fn activity_feed(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let events = ActivityRepo::recent(&state.pool, params.limit).await?;
    Ok(Json(DataResponse { data: events }))
}
