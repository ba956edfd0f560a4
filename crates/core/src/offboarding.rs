//! Offboarding accounting: per-item results and the deactivation rule.
//!
//! The orchestrator in `itam-api` attempts each selected item independently
//! and records outcomes here. The report is the caller's contract: a batch
//! with failures is not an error, and the employee is deactivated only when
//! a clean batch covered every assignment that was active at the start.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Failure reason recorded when a per-item call exceeds its time bound.
pub const REASON_TIMEOUT: &str = "timeout";

/// The three assignable resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Device,
    License,
    Phone,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Device => "device",
            ResourceKind::License => "license",
            ResourceKind::Phone => "phone",
        }
    }
}

/// One selectable unit of offboarding work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffboardItem {
    pub resource_type: ResourceKind,
    pub resource_id: DbId,
}

/// A failed item and the reason its termination was refused.
#[derive(Debug, Clone, Serialize)]
pub struct ItemFailure {
    pub item: OffboardItem,
    pub reason: String,
}

/// Aggregated outcome of one offboarding batch.
#[derive(Debug, Default, Serialize)]
pub struct OffboardingReport {
    pub succeeded: u32,
    pub failed: u32,
    pub failures: Vec<ItemFailure>,
}

impl OffboardingReport {
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, item: OffboardItem, reason: impl Into<String>) {
        self.failed += 1;
        self.failures.push(ItemFailure {
            item,
            reason: reason.into(),
        });
    }

    /// True iff every attempted item succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// True iff `selection` includes every item in `active`.
///
/// An empty `active` set is not covered: a no-op offboarding succeeds but
/// leaves the employee's status untouched.
pub fn covers_all_active(selection: &[OffboardItem], active: &[OffboardItem]) -> bool {
    if active.is_empty() {
        return false;
    }
    active.iter().all(|item| selection.contains(item))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: DbId) -> OffboardItem {
        OffboardItem {
            resource_type: ResourceKind::Device,
            resource_id: id,
        }
    }

    fn license(id: DbId) -> OffboardItem {
        OffboardItem {
            resource_type: ResourceKind::License,
            resource_id: id,
        }
    }

    #[test]
    fn report_counts_successes_and_failures() {
        let mut report = OffboardingReport::default();
        report.record_success();
        report.record_success();
        report.record_failure(device(3), "no active assignment");

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reason, "no active assignment");
        assert!(!report.is_clean());
    }

    #[test]
    fn empty_report_is_clean() {
        assert!(OffboardingReport::default().is_clean());
    }

    #[test]
    fn full_selection_covers_active_set() {
        let active = vec![device(1), license(2)];
        let selection = vec![license(2), device(1)];
        assert!(covers_all_active(&selection, &active));
    }

    #[test]
    fn partial_selection_does_not_cover() {
        let active = vec![device(1), license(2)];
        let selection = vec![device(1)];
        assert!(!covers_all_active(&selection, &active));
    }

    #[test]
    fn same_id_different_kind_does_not_cover() {
        let active = vec![license(1)];
        let selection = vec![device(1)];
        assert!(!covers_all_active(&selection, &active));
    }

    #[test]
    fn empty_active_set_is_never_covered() {
        assert!(!covers_all_active(&[device(1)], &[]));
        assert!(!covers_all_active(&[], &[]));
    }

    #[test]
    fn extra_selected_items_still_cover() {
        let active = vec![device(1)];
        let selection = vec![device(1), license(9)];
        assert!(covers_all_active(&selection, &active));
    }
}
