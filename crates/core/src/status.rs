//! Status vocabularies for resources, employees, and ledger rows.
//!
//! Statuses are stored as lowercase TEXT; each enum mirrors the CHECK
//! constraint on its table. Assignability is a property of the resource's
//! lifecycle status only -- whether something is currently *held* is the
//! ledger's business, not the status field's.

use serde::{Deserialize, Serialize};

use crate::error::AssignmentError;

/// Ledger row state: assignment currently held.
pub const ASSIGNMENT_ACTIVE: &str = "active";

/// Ledger row state: device or phone assignment closed by a return.
pub const ASSIGNMENT_RETURNED: &str = "returned";

/// Ledger row state: license assignment closed by a revocation.
pub const ASSIGNMENT_REVOKED: &str = "revoked";

macro_rules! define_status {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// The wire/database form of the status.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            /// Parse the lowercase wire form.
            pub fn parse(value: &str) -> Result<Self, AssignmentError> {
                match value {
                    $( $text => Ok($name::$variant), )+
                    other => Err(AssignmentError::Validation(format!(
                        concat!("unknown ", stringify!($name), " '{}'"),
                        other
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_status! {
    /// Device lifecycle status. Only `available` accepts a new assignment;
    /// a return always lands back on `available`.
    DeviceStatus {
        Available => "available",
        Assigned => "assigned",
        Maintenance => "maintenance",
        Retired => "retired",
        Lost => "lost",
        Damaged => "damaged",
    }
}

define_status! {
    /// License lifecycle status, independent of seat usage: an active
    /// license can be full, and a suspended one can have free seats.
    LicenseStatus {
        Active => "active",
        Expired => "expired",
        Suspended => "suspended",
        Cancelled => "cancelled",
    }
}

define_status! {
    /// Phone contract lifecycle status. Holding is tracked in the ledger;
    /// the status does not change when the contract is handed out.
    PhoneContractStatus {
        Active => "active",
        Suspended => "suspended",
        Cancelled => "cancelled",
        Expired => "expired",
    }
}

define_status! {
    /// Employee lifecycle status.
    EmployeeStatus {
        Active => "active",
        Inactive => "inactive",
        Terminated => "terminated",
    }
}

impl DeviceStatus {
    /// True iff a device in this status may receive a new assignment.
    pub fn is_assignable(self) -> bool {
        matches!(self, DeviceStatus::Available)
    }
}

impl LicenseStatus {
    /// True iff seats on a license in this status may be handed out
    /// (capacity permitting).
    pub fn is_assignable(self) -> bool {
        matches!(self, LicenseStatus::Active)
    }
}

impl PhoneContractStatus {
    /// True iff a contract in this status may receive a new assignment
    /// (single-holder rule permitting).
    pub fn is_assignable(self) -> bool {
        matches!(self, PhoneContractStatus::Active)
    }
}

impl EmployeeStatus {
    /// True iff an employee in this status may receive new assignments.
    pub fn is_eligible(self) -> bool {
        matches!(self, EmployeeStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn device_status_round_trips() {
        for status in [
            DeviceStatus::Available,
            DeviceStatus::Assigned,
            DeviceStatus::Maintenance,
            DeviceStatus::Retired,
            DeviceStatus::Lost,
            DeviceStatus::Damaged,
        ] {
            assert_eq!(DeviceStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn parse_rejects_unknown_and_uppercase() {
        assert_matches!(
            DeviceStatus::parse("broken"),
            Err(AssignmentError::Validation(_))
        );
        assert_matches!(
            DeviceStatus::parse("Available"),
            Err(AssignmentError::Validation(_))
        );
    }

    #[test]
    fn only_available_devices_are_assignable() {
        assert!(DeviceStatus::Available.is_assignable());
        assert!(!DeviceStatus::Assigned.is_assignable());
        assert!(!DeviceStatus::Maintenance.is_assignable());
        assert!(!DeviceStatus::Retired.is_assignable());
        assert!(!DeviceStatus::Lost.is_assignable());
        assert!(!DeviceStatus::Damaged.is_assignable());
    }

    #[test]
    fn only_active_licenses_and_contracts_are_assignable() {
        assert!(LicenseStatus::Active.is_assignable());
        assert!(!LicenseStatus::Expired.is_assignable());
        assert!(!LicenseStatus::Suspended.is_assignable());
        assert!(!LicenseStatus::Cancelled.is_assignable());

        assert!(PhoneContractStatus::Active.is_assignable());
        assert!(!PhoneContractStatus::Suspended.is_assignable());
        assert!(!PhoneContractStatus::Cancelled.is_assignable());
        assert!(!PhoneContractStatus::Expired.is_assignable());
    }

    #[test]
    fn only_active_employees_are_eligible() {
        assert!(EmployeeStatus::Active.is_eligible());
        assert!(!EmployeeStatus::Inactive.is_eligible());
        assert!(!EmployeeStatus::Terminated.is_eligible());
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(LicenseStatus::Suspended.to_string(), "suspended");
        assert_eq!(EmployeeStatus::Terminated.to_string(), "terminated");
    }
}
