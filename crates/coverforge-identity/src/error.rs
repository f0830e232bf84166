//! Error types for the identity model.

/// Errors that can occur while interpreting identity data.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The label is not one of the closed role set
    /// (`admin`, `broker`, `agent`).
    #[error("unknown role label: {0}")]
    UnknownRole(String),
}
