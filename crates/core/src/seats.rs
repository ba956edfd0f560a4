//! Seat-capacity policy for licenses.
//!
//! The allocator is the single authority over a license's used-seat count:
//! these checks run against ledger-derived state inside the same transaction
//! that writes the ledger, and the cached count is rewritten from the ledger
//! in that transaction. A caller-supplied count is never trusted.

use crate::error::AssignmentError;
use crate::status::LicenseStatus;
use crate::types::DbId;

/// True iff the license can accept one more active assignment.
pub fn can_assign(status: LicenseStatus, active_seats: i64, max_users: i32) -> bool {
    status.is_assignable() && active_seats < i64::from(max_users)
}

/// Check assignability, reporting why a seat cannot be handed out.
///
/// Lifecycle status is checked before capacity: a suspended-but-empty
/// license is unavailable, not full.
pub fn ensure_seat_available(
    license_id: DbId,
    status: LicenseStatus,
    active_seats: i64,
    max_users: i32,
) -> Result<(), AssignmentError> {
    if !status.is_assignable() {
        return Err(AssignmentError::ResourceUnavailable {
            resource: "license",
            id: license_id,
            status: status.to_string(),
        });
    }
    if active_seats >= i64::from(max_users) {
        return Err(AssignmentError::CapacityExceeded {
            license_id,
            max_users,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn seat_available_below_ceiling() {
        assert!(can_assign(LicenseStatus::Active, 0, 1));
        assert!(can_assign(LicenseStatus::Active, 4, 5));
        assert!(ensure_seat_available(1, LicenseStatus::Active, 4, 5).is_ok());
    }

    #[test]
    fn full_license_is_capacity_exceeded() {
        assert!(!can_assign(LicenseStatus::Active, 5, 5));
        assert_matches!(
            ensure_seat_available(1, LicenseStatus::Active, 5, 5),
            Err(AssignmentError::CapacityExceeded {
                license_id: 1,
                max_users: 5
            })
        );
    }

    #[test]
    fn overcommitted_license_is_still_capacity_exceeded() {
        // A drifted cache may report more active seats than the ceiling;
        // the check must not wrap around or accept it.
        assert_matches!(
            ensure_seat_available(1, LicenseStatus::Active, 7, 5),
            Err(AssignmentError::CapacityExceeded { .. })
        );
    }

    #[test]
    fn inactive_license_reports_status_not_capacity() {
        for status in [
            LicenseStatus::Expired,
            LicenseStatus::Suspended,
            LicenseStatus::Cancelled,
        ] {
            assert!(!can_assign(status, 0, 5));
            assert_matches!(
                ensure_seat_available(9, status, 0, 5),
                Err(AssignmentError::ResourceUnavailable {
                    resource: "license",
                    id: 9,
                    ..
                })
            );
        }
    }
}
