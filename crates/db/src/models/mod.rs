//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the operations that touch the table
//!
//! Derived fields (`licenses.current_users`, device `status`) never appear
//! in DTOs: the engine computes them in lock-step with ledger writes.

pub mod activity;
pub mod device;
pub mod device_assignment;
pub mod employee;
pub mod license;
pub mod license_assignment;
pub mod phone_assignment;
pub mod phone_contract;
