pub mod assignments;
pub mod health;
pub mod licenses;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /assignments/device                       assign (POST)
/// /assignments/device/unassign              return (POST)
/// /assignments/license                      assign seat (POST)
/// /assignments/license/unassign             revoke seat (POST)
/// /assignments/phone                        assign (POST)
/// /assignments/phone/return                 return (POST)
/// /assignments/offboard                     batch termination (POST)
/// /assignments/activity                     merged feed (GET)
/// /assignments/devices                      device ledger (GET)
/// /assignments/licenses                     license ledger (GET)
/// /assignments/phones                       phone ledger (GET)
/// /assignments/employee/{id}/active         active items for offboarding (GET)
///
/// /licenses/{id}/recount-seats              heal seat cache (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/assignments", assignments::router())
        .nest("/licenses", licenses::router())
}
