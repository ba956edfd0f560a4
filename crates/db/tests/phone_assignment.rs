//! Integration tests for the phone contract assignment engine.
//!
//! A contract has a single holder tracked purely in the ledger; its own
//! lifecycle status never changes on assignment or return.

use assert_matches::assert_matches;
use itam_core::error::AssignmentError;
use itam_core::status::PhoneContractStatus;
use itam_db::error::EngineError;
use itam_db::models::employee::CreateEmployee;
use itam_db::models::phone_assignment::{AssignPhone, ReturnPhone};
use itam_db::models::phone_contract::CreatePhoneContract;
use itam_db::repositories::{EmployeeRepo, PhoneAssignmentRepo, PhoneContractRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_employee(pool: &PgPool, email: &str) -> i64 {
    EmployeeRepo::create(
        pool,
        &CreateEmployee {
            first_name: "Edsger".to_string(),
            last_name: "Dijkstra".to_string(),
            email: email.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_contract(pool: &PgPool, number: &str) -> i64 {
    PhoneContractRepo::create(
        pool,
        &CreatePhoneContract {
            phone_number: number.to_string(),
            carrier: Some("Vodafone".to_string()),
            company_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn assign(phone_contract_id: i64, employee_id: i64) -> AssignPhone {
    AssignPhone {
        phone_contract_id,
        employee_id,
        assigned_by: "it-admin".to_string(),
        notes: None,
    }
}

fn ret(phone_contract_id: i64) -> ReturnPhone {
    ReturnPhone {
        phone_contract_id,
        returned_by: "it-admin".to_string(),
        notes: None,
    }
}

async fn contract_status(pool: &PgPool, id: i64) -> String {
    PhoneContractRepo::find_by_id(pool, id)
        .await
        .unwrap()
        .unwrap()
        .status
}

// ---------------------------------------------------------------------------
// Test: assignment and return leave the contract status untouched
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assignment_does_not_touch_contract_status(pool: PgPool) {
    let employee = new_employee(&pool, "edsger@example.com").await;
    let contract = new_contract(&pool, "+31-20-1234567").await;

    let assignment = PhoneAssignmentRepo::assign(&pool, &assign(contract, employee))
        .await
        .unwrap();
    assert_eq!(assignment.status, "active");
    assert_eq!(contract_status(&pool, contract).await, "active");

    let closed = PhoneAssignmentRepo::unassign(&pool, &ret(contract))
        .await
        .unwrap();
    assert_eq!(closed.status, "returned");
    assert!(closed.returned_date.is_some());
    assert_eq!(contract_status(&pool, contract).await, "active");
}

// ---------------------------------------------------------------------------
// Test: single holder is enforced through the ledger
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_single_holder_enforced(pool: PgPool) {
    let holder = new_employee(&pool, "edsger@example.com").await;
    let other = new_employee(&pool, "tony@example.com").await;
    let contract = new_contract(&pool, "+31-20-1234567").await;

    PhoneAssignmentRepo::assign(&pool, &assign(contract, holder))
        .await
        .unwrap();

    // A different employee cannot take a held contract.
    let err = PhoneAssignmentRepo::assign(&pool, &assign(contract, other))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        EngineError::Assignment(AssignmentError::ResourceUnavailable {
            resource: "phone contract",
            ..
        })
    );

    // The holder repeating the request is a duplicate, not a state error.
    let err = PhoneAssignmentRepo::assign(&pool, &assign(contract, holder))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        EngineError::Assignment(AssignmentError::DuplicateAssignment {
            resource: "phone contract",
            ..
        })
    );
}

// ---------------------------------------------------------------------------
// Test: return frees the contract for the next holder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_return_then_reassign(pool: PgPool) {
    let first = new_employee(&pool, "edsger@example.com").await;
    let second = new_employee(&pool, "tony@example.com").await;
    let contract = new_contract(&pool, "+31-20-1234567").await;

    PhoneAssignmentRepo::assign(&pool, &assign(contract, first))
        .await
        .unwrap();
    PhoneAssignmentRepo::unassign(&pool, &ret(contract))
        .await
        .unwrap();

    let reassigned = PhoneAssignmentRepo::assign(&pool, &assign(contract, second))
        .await
        .unwrap();
    assert_eq!(reassigned.employee_id, second);

    let active = PhoneAssignmentRepo::find_active_by_contract(&pool, contract)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.employee_id, second);
}

// ---------------------------------------------------------------------------
// Test: non-active contracts are not assignable
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inactive_contract_is_not_assignable(pool: PgPool) {
    let employee = new_employee(&pool, "edsger@example.com").await;
    let contract = new_contract(&pool, "+31-20-1234567").await;

    for status in [
        PhoneContractStatus::Suspended,
        PhoneContractStatus::Cancelled,
        PhoneContractStatus::Expired,
    ] {
        PhoneContractRepo::set_status(&pool, contract, status)
            .await
            .unwrap();

        let err = PhoneAssignmentRepo::assign(&pool, &assign(contract, employee))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            EngineError::Assignment(AssignmentError::ResourceUnavailable { .. })
        );
    }
}

// ---------------------------------------------------------------------------
// Test: return with nothing to close
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_return_without_holder_is_rejected(pool: PgPool) {
    let contract = new_contract(&pool, "+31-20-1234567").await;

    let err = PhoneAssignmentRepo::unassign(&pool, &ret(contract))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        EngineError::Assignment(AssignmentError::NoActiveAssignment {
            resource: "phone contract",
            ..
        })
    );

    let err = PhoneAssignmentRepo::unassign(&pool, &ret(9999))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        EngineError::Assignment(AssignmentError::NotFound {
            entity: "PhoneContract",
            ..
        })
    );
}
