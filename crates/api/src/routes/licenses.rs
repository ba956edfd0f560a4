//! License-scoped maintenance routes, merged under `/licenses`.

use axum::routing::post;
use axum::Router;

use crate::handlers::license_assignment;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{license_id}/recount-seats",
        post(license_assignment::recount_seats),
    )
}
