//! Integration tests for the merged activity feed.
//!
//! The feed is a lazy union over the three ledgers: typed, reverse
//! chronological, bounded by the caller's limit, and recomputed from
//! current state on every call.

use itam_db::models::device::CreateDevice;
use itam_db::models::device_assignment::{AssignDevice, UnassignDevice};
use itam_db::models::employee::CreateEmployee;
use itam_db::models::license::CreateLicense;
use itam_db::models::license_assignment::AssignLicense;
use itam_db::models::phone_assignment::AssignPhone;
use itam_db::models::phone_contract::CreatePhoneContract;
use itam_db::repositories::{
    ActivityRepo, DeviceAssignmentRepo, DeviceRepo, EmployeeRepo, LicenseAssignmentRepo,
    LicenseRepo, PhoneAssignmentRepo, PhoneContractRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed one employee holding a device, a license seat, and a phone, then
/// return the device. Produces four events in a known order.
async fn seed_history(pool: &PgPool) -> i64 {
    let employee = EmployeeRepo::create(
        pool,
        &CreateEmployee {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
        },
    )
    .await
    .unwrap()
    .id;

    let device = DeviceRepo::create(
        pool,
        &CreateDevice {
            name: "ThinkPad X1".to_string(),
            serial_number: "SN-200".to_string(),
            company_id: None,
        },
    )
    .await
    .unwrap()
    .id;

    let license = LicenseRepo::create(
        pool,
        &CreateLicense {
            name: "IDE Ultimate".to_string(),
            vendor: None,
            company_id: None,
            max_users: 2,
        },
    )
    .await
    .unwrap()
    .id;

    let contract = PhoneContractRepo::create(
        pool,
        &CreatePhoneContract {
            phone_number: "+1-555-0100".to_string(),
            carrier: None,
            company_id: None,
        },
    )
    .await
    .unwrap()
    .id;

    DeviceAssignmentRepo::assign(
        pool,
        &AssignDevice {
            device_id: device,
            employee_id: employee,
            assigned_by: "it-admin".to_string(),
            notes: None,
        },
    )
    .await
    .unwrap();

    LicenseAssignmentRepo::assign(
        pool,
        &AssignLicense {
            license_id: license,
            employee_id: employee,
            assigned_by: "it-admin".to_string(),
            notes: None,
        },
    )
    .await
    .unwrap();

    PhoneAssignmentRepo::assign(
        pool,
        &AssignPhone {
            phone_contract_id: contract,
            employee_id: employee,
            assigned_by: "it-admin".to_string(),
            notes: None,
        },
    )
    .await
    .unwrap();

    DeviceAssignmentRepo::unassign(
        pool,
        &UnassignDevice {
            device_id: device,
            returned_by: "help-desk".to_string(),
            notes: None,
        },
    )
    .await
    .unwrap();

    employee
}

// ---------------------------------------------------------------------------
// Test: feed merges all three ledgers newest-first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_merges_ledgers_newest_first(pool: PgPool) {
    seed_history(&pool).await;

    let events = ActivityRepo::recent(&pool, Some(10)).await.unwrap();
    let shape: Vec<(&str, &str)> = events
        .iter()
        .map(|e| (e.resource_type.as_str(), e.action.as_str()))
        .collect();

    assert_eq!(
        shape,
        vec![
            ("device", "returned"),
            ("phone", "assigned"),
            ("license", "assigned"),
            ("device", "assigned"),
        ]
    );

    // Timestamps are non-increasing down the feed.
    for pair in events.windows(2) {
        assert!(pair[0].occurred_at >= pair[1].occurred_at);
    }
}

// ---------------------------------------------------------------------------
// Test: display joins carry employee and resource summaries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_carries_display_fields(pool: PgPool) {
    let employee = seed_history(&pool).await;

    let events = ActivityRepo::recent(&pool, Some(10)).await.unwrap();

    let returned = &events[0];
    assert_eq!(returned.employee_id, employee);
    assert_eq!(returned.employee_name, "Grace Hopper");
    assert_eq!(returned.resource_label, "ThinkPad X1");
    assert_eq!(returned.actor, "help-desk");

    let phone_assigned = &events[1];
    assert_eq!(phone_assigned.resource_label, "+1-555-0100");
    assert_eq!(phone_assigned.actor, "it-admin");
}

// ---------------------------------------------------------------------------
// Test: the limit bounds the sequence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_respects_limit(pool: PgPool) {
    seed_history(&pool).await;

    let events = ActivityRepo::recent(&pool, Some(2)).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, "returned");
    assert_eq!(events[1].resource_type, "phone");

    // Out-of-range limits are clamped instead of erroring.
    let events = ActivityRepo::recent(&pool, Some(0)).await.unwrap();
    assert_eq!(events.len(), 1);

    let events = ActivityRepo::recent(&pool, None).await.unwrap();
    assert_eq!(events.len(), 4);
}

// ---------------------------------------------------------------------------
// Test: the feed holds no cursor between calls
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_is_restartable(pool: PgPool) {
    seed_history(&pool).await;

    let first = ActivityRepo::recent(&pool, Some(10)).await.unwrap();
    let second = ActivityRepo::recent(&pool, Some(10)).await.unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.assignment_id, b.assignment_id);
        assert_eq!(a.action, b.action);
        assert_eq!(a.occurred_at, b.occurred_at);
    }
}

// ---------------------------------------------------------------------------
// Test: an empty system produces an empty feed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_feed(pool: PgPool) {
    let events = ActivityRepo::recent(&pool, Some(10)).await.unwrap();
    assert!(events.is_empty());
}
