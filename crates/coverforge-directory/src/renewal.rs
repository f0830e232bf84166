//! Policy renewals and the derivations the renewals page shows.
//!
//! A renewal tracks how many days remain before a policy lapses. The page
//! colors each row by urgency (7- and 14-day thresholds) and summarizes
//! the book: how many renewals fall due in the next N days and how much
//! premium is at risk if they lapse.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Renewal
// ---------------------------------------------------------------------------

/// A unique identifier for a renewal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenewalId(pub u64);

impl fmt::Display for RenewalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RN-{}", self.0)
    }
}

/// Broker-assigned follow-up priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{label}")
    }
}

/// Where the renewal conversation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenewalStatus {
    /// Nobody has reached out yet.
    Pending,
    /// The customer has been contacted.
    Contacted,
    /// The customer renewed.
    Renewed,
    /// The customer declined to renew.
    Declined,
}

impl fmt::Display for RenewalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Contacted => "contacted",
            Self::Renewed => "renewed",
            Self::Declined => "declined",
        };
        write!(f, "{label}")
    }
}

/// How soon a renewal needs attention, derived from days remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Seven days or fewer (including already lapsed).
    Critical,
    /// Eight to fourteen days.
    Soon,
    /// More than fourteen days out.
    Upcoming,
}

/// One policy coming up for renewal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Renewal {
    pub id: RenewalId,
    /// Customer the policy belongs to.
    pub customer: String,
    /// Policy number, e.g. `AUTO-2024-001`.
    pub policy: String,
    /// Annual premium in whole currency units.
    pub premium: u64,
    /// Days until the policy lapses. Negative means already lapsed.
    pub days_left: i64,
    pub priority: Priority,
    pub status: RenewalStatus,
}

impl Renewal {
    /// Urgency bucket for this renewal. Thresholds are the ones the page
    /// colors by: ≤7 days critical, ≤14 soon, otherwise upcoming.
    pub fn urgency(&self) -> Urgency {
        if self.days_left <= 7 {
            Urgency::Critical
        } else if self.days_left <= 14 {
            Urgency::Soon
        } else {
            Urgency::Upcoming
        }
    }
}

// ---------------------------------------------------------------------------
// RenewalLedger
// ---------------------------------------------------------------------------

/// All upcoming renewals known to the portal.
#[derive(Debug, Default)]
pub struct RenewalLedger {
    renewals: HashMap<RenewalId, Renewal>,
}

impl RenewalLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any existing entry with the same id.
    pub fn insert(&mut self, renewal: Renewal) -> Option<Renewal> {
        let replaced = self.renewals.insert(renewal.id, renewal);
        if let Some(old) = &replaced {
            tracing::debug!(id = %old.id, "renewal entry replaced");
        }
        replaced
    }

    /// Renewals falling due within `days`, soonest first.
    ///
    /// Already-lapsed entries (negative `days_left`) are included — they
    /// need attention more than anything else.
    pub fn due_within(&self, days: i64) -> Vec<&Renewal> {
        let mut due: Vec<&Renewal> = self
            .renewals
            .values()
            .filter(|r| r.days_left <= days)
            .collect();
        due.sort_by_key(|r| (r.days_left, r.id.0));
        due
    }

    /// Premium that lapses if nothing due within `days` renews.
    pub fn premium_at_risk(&self, days: i64) -> u64 {
        self.due_within(days).iter().map(|r| r.premium).sum()
    }

    /// Number of renewals in the given status.
    pub fn count_with_status(&self, status: RenewalStatus) -> usize {
        self.renewals
            .values()
            .filter(|r| r.status == status)
            .count()
    }

    /// Iterates all entries, soonest first.
    pub fn iter(&self) -> impl Iterator<Item = &Renewal> {
        let mut all: Vec<&Renewal> = self.renewals.values().collect();
        all.sort_by_key(|r| (r.days_left, r.id.0));
        all.into_iter()
    }

    /// Number of entries in the ledger.
    pub fn len(&self) -> usize {
        self.renewals.len()
    }

    /// Returns `true` if the ledger has no entries.
    pub fn is_empty(&self) -> bool {
        self.renewals.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn renewal(id: u64, days_left: i64, premium: u64) -> Renewal {
        Renewal {
            id: RenewalId(id),
            customer: format!("Customer {id}"),
            policy: format!("AUTO-2024-{id:03}"),
            premium,
            days_left,
            priority: Priority::Medium,
            status: RenewalStatus::Pending,
        }
    }

    // =====================================================================
    // urgency()
    // =====================================================================

    #[test]
    fn test_urgency_critical_at_seven_days_or_less() {
        assert_eq!(renewal(1, 7, 0).urgency(), Urgency::Critical);
        assert_eq!(renewal(1, 1, 0).urgency(), Urgency::Critical);
        // Already lapsed is still critical.
        assert_eq!(renewal(1, -3, 0).urgency(), Urgency::Critical);
    }

    #[test]
    fn test_urgency_soon_between_eight_and_fourteen_days() {
        assert_eq!(renewal(1, 8, 0).urgency(), Urgency::Soon);
        assert_eq!(renewal(1, 14, 0).urgency(), Urgency::Soon);
    }

    #[test]
    fn test_urgency_upcoming_beyond_fourteen_days() {
        assert_eq!(renewal(1, 15, 0).urgency(), Urgency::Upcoming);
        assert_eq!(renewal(1, 40, 0).urgency(), Urgency::Upcoming);
    }

    // =====================================================================
    // due_within() / premium_at_risk()
    // =====================================================================

    #[test]
    fn test_due_within_filters_and_sorts_soonest_first() {
        let mut ledger = RenewalLedger::new();
        ledger.insert(renewal(1, 17, 95_000));
        ledger.insert(renewal(2, 20, 78_000));
        ledger.insert(renewal(3, 34, 125_000));
        ledger.insert(renewal(4, 40, 65_000));

        let due = ledger.due_within(30);
        let ids: Vec<u64> = due.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_due_within_boundary_is_inclusive() {
        let mut ledger = RenewalLedger::new();
        ledger.insert(renewal(1, 30, 100));
        assert_eq!(ledger.due_within(30).len(), 1);
    }

    #[test]
    fn test_premium_at_risk_sums_only_due_entries() {
        let mut ledger = RenewalLedger::new();
        ledger.insert(renewal(1, 17, 95_000));
        ledger.insert(renewal(2, 20, 78_000));
        ledger.insert(renewal(3, 34, 125_000));

        assert_eq!(ledger.premium_at_risk(30), 95_000 + 78_000);
    }

    #[test]
    fn test_premium_at_risk_empty_ledger_is_zero() {
        assert_eq!(RenewalLedger::new().premium_at_risk(30), 0);
    }

    // =====================================================================
    // count_with_status()
    // =====================================================================

    #[test]
    fn test_count_with_status() {
        let mut ledger = RenewalLedger::new();
        let mut renewed = renewal(1, 27, 0);
        renewed.status = RenewalStatus::Renewed;
        ledger.insert(renewed);
        ledger.insert(renewal(2, 17, 0));
        ledger.insert(renewal(3, 24, 0));

        assert_eq!(ledger.count_with_status(RenewalStatus::Renewed), 1);
        assert_eq!(ledger.count_with_status(RenewalStatus::Pending), 2);
        assert_eq!(ledger.count_with_status(RenewalStatus::Declined), 0);
    }
}
