//! Route definitions for assignment operations, merged under `/assignments`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{
    activity, device_assignment, license_assignment, offboarding, phone_assignment,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/device", post(device_assignment::assign_device))
        .route("/device/unassign", post(device_assignment::unassign_device))
        .route("/license", post(license_assignment::assign_license))
        .route("/license/unassign", post(license_assignment::revoke_license))
        .route("/phone", post(phone_assignment::assign_phone))
        .route("/phone/return", post(phone_assignment::return_phone))
        .route("/offboard", post(offboarding::offboard))
        .route("/activity", get(activity::activity_feed))
        .route("/devices", get(device_assignment::list_device_assignments))
        .route("/licenses", get(license_assignment::list_license_assignments))
        .route("/phones", get(phone_assignment::list_phone_assignments))
        .route(
            "/employee/{employee_id}/active",
            get(offboarding::list_active_for_employee),
        )
}
