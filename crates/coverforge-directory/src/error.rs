//! Error types for the directory layer.

use crate::CustomerId;

/// Errors from directory lookups.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// No customer record exists for the given id.
    #[error("customer not found: {0}")]
    CustomerNotFound(CustomerId),
}
