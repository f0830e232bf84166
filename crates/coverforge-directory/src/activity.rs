//! The recent-activity strip on the dashboard.
//!
//! A bounded, newest-first log. When the cap is reached the oldest entry
//! falls off — the dashboard only ever shows the most recent handful.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// What kind of work the entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// A policy document was scanned in.
    Scan,
    /// A renewal reminder or follow-up.
    Renewal,
    /// A customer record was added or changed.
    Customer,
    /// A policy was created or updated.
    Policy,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Scan => "scan",
            Self::Renewal => "renewal",
            Self::Customer => "customer",
            Self::Policy => "policy",
        };
        write!(f, "{label}")
    }
}

/// One entry in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    /// Human-readable line, e.g. "Renewal reminder sent to Priya Sharma".
    pub description: String,
}

/// Bounded newest-first activity log.
#[derive(Debug)]
pub struct ActivityFeed {
    entries: VecDeque<Activity>,
    cap: usize,
}

impl ActivityFeed {
    /// Default capacity: plenty for a dashboard strip.
    pub const DEFAULT_CAP: usize = 50;

    /// Creates a feed holding at most `cap` entries. A cap of zero keeps
    /// nothing.
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cap,
        }
    }

    /// Creates a feed with the default capacity.
    pub fn new() -> Self {
        Self::with_cap(Self::DEFAULT_CAP)
    }

    /// Records an entry at the front of the feed, evicting the oldest if
    /// the feed is full.
    pub fn record(&mut self, kind: ActivityKind, description: impl Into<String>) {
        if self.cap == 0 {
            return;
        }
        if self.entries.len() == self.cap {
            self.entries.pop_back();
        }
        self.entries.push_front(Activity {
            kind,
            description: description.into(),
        });
    }

    /// The `n` most recent entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&Activity> {
        self.entries.iter().take(n).collect()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
