//! CRM datasets for Coverforge: the numbers behind the dashboard pages.
//!
//! Everything here is in-memory and synchronous. The dashboards don't do
//! hard work — they filter, count, and sum — so this crate is plain data
//! plus the derivations each page renders:
//!
//! - [`CustomerBook`] — customer records, search, and book-level stats
//! - [`RenewalLedger`] — upcoming renewals, urgency, premium at risk
//! - [`ActivityFeed`] — the recent-activity strip
//! - [`analytics`] — revenue growth and distribution shares

pub mod analytics;
mod activity;
mod customer;
mod error;
mod renewal;

pub use activity::{Activity, ActivityFeed, ActivityKind};
pub use customer::{
    Customer, CustomerBook, CustomerId, CustomerStats, CustomerStatus,
};
pub use error::DirectoryError;
pub use renewal::{
    Priority, Renewal, RenewalId, RenewalLedger, RenewalStatus, Urgency,
};
