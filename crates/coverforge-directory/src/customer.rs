//! Customer records and the in-memory customer book.
//!
//! The book is a registry keyed by customer id. Search is the exact
//! filter the customers page applies: case-insensitive substring on name
//! or email, raw substring on phone (so "(555)" and "555" both work).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DirectoryError;

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

/// A unique identifier for a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// Where a customer relationship stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// Has at least one live policy.
    Active,
    /// Onboarding or quote outstanding.
    Pending,
    /// No live policies; kept for history.
    Inactive,
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Inactive => "inactive",
        };
        write!(f, "{label}")
    }
}

/// One customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique id within the book.
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Number of policies held.
    pub policies: u32,
    /// Total annual premium across all policies, in whole currency units.
    pub total_premium: u64,
    /// ISO date (`YYYY-MM-DD`) of the last recorded contact.
    pub last_contact: String,
    pub status: CustomerStatus,
}

// ---------------------------------------------------------------------------
// CustomerBook
// ---------------------------------------------------------------------------

/// Book-level summary: the four tiles under the customer grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CustomerStats {
    /// All customers, any status.
    pub total: usize,
    /// Customers with [`CustomerStatus::Active`].
    pub active: usize,
    /// Sum of policy counts.
    pub total_policies: u64,
    /// Sum of annual premiums.
    pub total_premium: u64,
}

/// All customer records known to the portal.
#[derive(Debug, Default)]
pub struct CustomerBook {
    customers: HashMap<CustomerId, Customer>,
}

impl CustomerBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing any existing record with the same id.
    /// Returns the replaced record, if there was one.
    pub fn insert(&mut self, customer: Customer) -> Option<Customer> {
        let replaced = self.customers.insert(customer.id, customer);
        if let Some(old) = &replaced {
            tracing::debug!(id = %old.id, "customer record replaced");
        }
        replaced
    }

    /// Looks up a customer by id.
    ///
    /// # Errors
    /// [`DirectoryError::CustomerNotFound`] if no record exists.
    pub fn get(&self, id: CustomerId) -> Result<&Customer, DirectoryError> {
        self.customers
            .get(&id)
            .ok_or(DirectoryError::CustomerNotFound(id))
    }

    /// Filters the book by a search term.
    ///
    /// Matches are case-insensitive on name and email and raw on phone.
    /// An empty term matches everything. Results are ordered by id so the
    /// grid renders stably.
    pub fn search(&self, term: &str) -> Vec<&Customer> {
        let needle = term.to_lowercase();
        let mut hits: Vec<&Customer> = self
            .customers
            .values()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
                    || c.phone.contains(term)
            })
            .collect();
        hits.sort_by_key(|c| c.id.0);
        hits
    }

    /// Computes the book-level summary tiles.
    pub fn stats(&self) -> CustomerStats {
        let mut stats = CustomerStats {
            total: self.customers.len(),
            ..CustomerStats::default()
        };
        for customer in self.customers.values() {
            if customer.status == CustomerStatus::Active {
                stats.active += 1;
            }
            stats.total_policies += u64::from(customer.policies);
            stats.total_premium += customer.total_premium;
        }
        stats
    }

    /// Iterates all records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        let mut all: Vec<&Customer> = self.customers.values().collect();
        all.sort_by_key(|c| c.id.0);
        all.into_iter()
    }

    /// Number of records in the book.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if the book has no records.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
