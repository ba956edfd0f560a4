//! Offboarding orchestrator: batch termination of one employee's
//! assignments across all three ledgers.
//!
//! Each selected item is attempted independently under its own time bound;
//! one failure does not abort the rest. This is deliberately not a single
//! transaction across resource types -- the caller gets a per-item report
//! and retries only the failed subset.

use std::time::Duration;

use itam_core::error::AssignmentError;
use itam_core::offboarding::{
    covers_all_active, OffboardItem, OffboardingReport, ResourceKind, REASON_TIMEOUT,
};
use itam_core::status::EmployeeStatus;
use itam_core::types::DbId;
use itam_db::error::EngineError;
use itam_db::models::device_assignment::UnassignDevice;
use itam_db::models::license_assignment::RevokeLicense;
use itam_db::models::phone_assignment::ReturnPhone;
use itam_db::repositories::{
    DeviceAssignmentRepo, EmployeeRepo, LicenseAssignmentRepo, PhoneAssignmentRepo,
};
use sqlx::PgPool;

/// Outcome of an offboarding batch, including whether the employee was
/// deactivated as a result.
#[derive(Debug, serde::Serialize)]
pub struct OffboardingOutcome {
    #[serde(flatten)]
    pub report: OffboardingReport,
    pub employee_deactivated: bool,
}

/// Every active assignment an employee currently holds, as selectable items.
pub async fn active_items(pool: &PgPool, employee_id: DbId) -> Result<Vec<OffboardItem>, EngineError> {
    let mut items = Vec::new();
    for assignment in DeviceAssignmentRepo::list_active_for_employee(pool, employee_id).await? {
        items.push(OffboardItem {
            resource_type: ResourceKind::Device,
            resource_id: assignment.device_id,
        });
    }
    for assignment in LicenseAssignmentRepo::list_active_for_employee(pool, employee_id).await? {
        items.push(OffboardItem {
            resource_type: ResourceKind::License,
            resource_id: assignment.license_id,
        });
    }
    for assignment in PhoneAssignmentRepo::list_active_for_employee(pool, employee_id).await? {
        items.push(OffboardItem {
            resource_type: ResourceKind::Phone,
            resource_id: assignment.phone_contract_id,
        });
    }
    Ok(items)
}

/// Terminate the selected assignments for one employee.
///
/// The employee transitions to 'inactive' only when every item succeeded
/// and the selection covered all assignments that were active when the
/// batch started. An employee with nothing active is a valid no-op: the
/// report is empty and the status is left untouched.
pub async fn offboard(
    pool: &PgPool,
    employee_id: DbId,
    items: &[OffboardItem],
    performed_by: &str,
    item_timeout: Duration,
) -> Result<OffboardingOutcome, EngineError> {
    EmployeeRepo::find_by_id(pool, employee_id)
        .await?
        .ok_or(AssignmentError::NotFound {
            entity: "Employee",
            id: employee_id,
        })?;

    // Snapshot before any termination: the deactivation decision compares
    // the selection against what was active at the start of the batch.
    let active = active_items(pool, employee_id).await?;

    let mut report = OffboardingReport::default();
    for item in items {
        let attempt = tokio::time::timeout(
            item_timeout,
            terminate_item(pool, employee_id, item, performed_by),
        )
        .await;

        match attempt {
            Ok(Ok(())) => report.record_success(),
            Ok(Err(err)) => {
                tracing::warn!(
                    employee_id,
                    resource_type = item.resource_type.as_str(),
                    resource_id = item.resource_id,
                    error = %err,
                    "Offboarding item failed"
                );
                report.record_failure(*item, err.to_string());
            }
            Err(_) => {
                tracing::warn!(
                    employee_id,
                    resource_type = item.resource_type.as_str(),
                    resource_id = item.resource_id,
                    timeout_secs = item_timeout.as_secs(),
                    "Offboarding item timed out"
                );
                report.record_failure(*item, REASON_TIMEOUT);
            }
        }
    }

    let mut employee_deactivated = false;
    if report.is_clean() && covers_all_active(items, &active) {
        employee_deactivated =
            EmployeeRepo::set_status(pool, employee_id, EmployeeStatus::Inactive).await?;
        tracing::info!(employee_id, "Employee deactivated after full offboarding");
    }

    Ok(OffboardingOutcome {
        report,
        employee_deactivated,
    })
}

/// Close one assignment through the engine for its resource type.
async fn terminate_item(
    pool: &PgPool,
    employee_id: DbId,
    item: &OffboardItem,
    performed_by: &str,
) -> Result<(), EngineError> {
    match item.resource_type {
        ResourceKind::Device => {
            DeviceAssignmentRepo::unassign(
                pool,
                &UnassignDevice {
                    device_id: item.resource_id,
                    returned_by: performed_by.to_string(),
                    notes: None,
                },
            )
            .await?;
        }
        ResourceKind::License => {
            LicenseAssignmentRepo::revoke(
                pool,
                &RevokeLicense {
                    license_id: item.resource_id,
                    employee_id,
                    revoked_by: performed_by.to_string(),
                    notes: None,
                },
            )
            .await?;
        }
        ResourceKind::Phone => {
            PhoneAssignmentRepo::unassign(
                pool,
                &ReturnPhone {
                    phone_contract_id: item.resource_id,
                    returned_by: performed_by.to_string(),
                    notes: None,
                },
            )
            .await?;
        }
    }
    Ok(())
}
