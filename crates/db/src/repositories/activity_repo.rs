//! Read-only merged activity feed across the three assignment ledgers.

use sqlx::PgPool;

use crate::models::activity::ActivityEvent;

/// Default page size for the feed.
const DEFAULT_LIMIT: i64 = 25;

/// Maximum page size for the feed.
const MAX_LIMIT: i64 = 100;

/// Every assignment row contributes an 'assigned' event and, once closed,
/// a termination event. The union is recomputed from current ledger state
/// on every call; ties on the timestamp break on assignment id so the
/// ordering is stable.
const FEED_QUERY: &str = "\
    WITH events AS ( \
        SELECT 'device' AS resource_type, 'assigned' AS action, \
               da.assigned_date AS occurred_at, da.id AS assignment_id, \
               d.id AS resource_id, d.name AS resource_label, \
               e.id AS employee_id, \
               e.first_name || ' ' || e.last_name AS employee_name, \
               da.assigned_by AS actor \
          FROM device_assignments da \
          JOIN devices d ON d.id = da.device_id \
          JOIN employees e ON e.id = da.employee_id \
        UNION ALL \
        SELECT 'device', 'returned', da.returned_date, da.id, \
               d.id, d.name, e.id, e.first_name || ' ' || e.last_name, \
               COALESCE(da.returned_by, da.assigned_by) \
          FROM device_assignments da \
          JOIN devices d ON d.id = da.device_id \
          JOIN employees e ON e.id = da.employee_id \
         WHERE da.returned_date IS NOT NULL \
        UNION ALL \
        SELECT 'license', 'assigned', la.assigned_date, la.id, \
               l.id, l.name, e.id, e.first_name || ' ' || e.last_name, \
               la.assigned_by \
          FROM license_assignments la \
          JOIN licenses l ON l.id = la.license_id \
          JOIN employees e ON e.id = la.employee_id \
        UNION ALL \
        SELECT 'license', 'revoked', la.revoked_date, la.id, \
               l.id, l.name, e.id, e.first_name || ' ' || e.last_name, \
               COALESCE(la.revoked_by, la.assigned_by) \
          FROM license_assignments la \
          JOIN licenses l ON l.id = la.license_id \
          JOIN employees e ON e.id = la.employee_id \
         WHERE la.revoked_date IS NOT NULL \
        UNION ALL \
        SELECT 'phone', 'assigned', pa.assigned_date, pa.id, \
               p.id, p.phone_number, e.id, e.first_name || ' ' || e.last_name, \
               pa.assigned_by \
          FROM phone_assignments pa \
          JOIN phone_contracts p ON p.id = pa.phone_contract_id \
          JOIN employees e ON e.id = pa.employee_id \
        UNION ALL \
        SELECT 'phone', 'returned', pa.returned_date, pa.id, \
               p.id, p.phone_number, e.id, e.first_name || ' ' || e.last_name, \
               COALESCE(pa.returned_by, pa.assigned_by) \
          FROM phone_assignments pa \
          JOIN phone_contracts p ON p.id = pa.phone_contract_id \
          JOIN employees e ON e.id = pa.employee_id \
         WHERE pa.returned_date IS NOT NULL \
    ) \
    SELECT resource_type, action, occurred_at, assignment_id, resource_id, \
           resource_label, employee_id, employee_name, actor \
      FROM events \
     ORDER BY occurred_at DESC, assignment_id DESC \
     LIMIT $1";

/// Read-only consumer of all three ledgers.
pub struct ActivityRepo;

impl ActivityRepo {
    /// The most recent assignment events, newest first.
    ///
    /// Holds no cursor state: each call recomputes from the ledgers, so a
    /// repeated call over unchanged data returns the same sequence.
    pub async fn recent(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<ActivityEvent>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        sqlx::query_as::<_, ActivityEvent>(FEED_QUERY)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
