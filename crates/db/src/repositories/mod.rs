//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. The assignment repositories
//! are the engine: every assign/unassign runs as one transaction that
//! locks the resource row, re-validates preconditions on the locked state,
//! writes the ledger, and updates the cached status before committing.

pub mod activity_repo;
pub mod device_assignment_repo;
pub mod device_repo;
pub mod employee_repo;
pub mod license_assignment_repo;
pub mod license_repo;
pub mod phone_assignment_repo;
pub mod phone_contract_repo;

pub use activity_repo::ActivityRepo;
pub use device_assignment_repo::DeviceAssignmentRepo;
pub use device_repo::DeviceRepo;
pub use employee_repo::EmployeeRepo;
pub use license_assignment_repo::LicenseAssignmentRepo;
pub use license_repo::LicenseRepo;
pub use phone_assignment_repo::PhoneAssignmentRepo;
pub use phone_contract_repo::PhoneContractRepo;
