//! Error types for the coordination layer.

/// Errors surfaced by authentication actions.
///
/// These cover the caller-facing failure paths only. Role-store failures
/// never appear here — the coordinator swallows them and degrades to an
/// empty role set (see [`StoreError`](crate::StoreError)).
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The provider refused the credentials or registration. The message
    /// is the provider's human-readable explanation and is safe to show
    /// to the user.
    #[error("{0}")]
    Rejected(String),

    /// The provider could not be reached or failed internally.
    #[error("identity provider error: {0}")]
    Provider(String),

    /// The coordinator has already shut down; no further state changes
    /// will be published.
    #[error("auth coordinator is closed")]
    Closed,
}
