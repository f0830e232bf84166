//! Summary derivations for the analytics page.
//!
//! The page renders a monthly revenue series, a month-over-month growth
//! figure, and a distribution breakdown. The charts themselves are out of
//! scope; these functions produce the numbers they plot.

use serde::{Deserialize, Serialize};

/// One month of revenue history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// Month label, e.g. "Jan".
    pub month: String,
    /// Revenue for the month, whole currency units.
    pub revenue: u64,
    /// Policies written in the month.
    pub policies: u64,
}

impl RevenuePoint {
    /// Convenience constructor.
    pub fn new(month: impl Into<String>, revenue: u64, policies: u64) -> Self {
        Self {
            month: month.into(),
            revenue,
            policies,
        }
    }
}

/// Month-over-month revenue growth of the latest point, in percent.
///
/// Returns `None` when there is no previous month to compare against or
/// the previous month had zero revenue (growth is undefined, not
/// infinite).
pub fn growth_pct(series: &[RevenuePoint]) -> Option<f64> {
    let [.., prev, last] = series else {
        return None;
    };
    if prev.revenue == 0 {
        return None;
    }
    let prev = prev.revenue as f64;
    let last = last.revenue as f64;
    Some((last - prev) / prev * 100.0)
}

/// Percentage share of each labeled count, in input order.
///
/// A zero total yields all-zero shares rather than NaN.
pub fn distribution_shares(counts: &[(String, u64)]) -> Vec<(String, f64)> {
    let total: u64 = counts.iter().map(|(_, n)| n).sum();
    counts
        .iter()
        .map(|(label, n)| {
            let share = if total == 0 {
                0.0
            } else {
                *n as f64 / total as f64 * 100.0
            };
            (label.clone(), share)
        })
        .collect()
}

// =========================================================================
// Tests
// =========================================================================
