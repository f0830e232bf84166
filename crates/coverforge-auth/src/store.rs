//! The role-store seam.
//!
//! Role assignments live in an external store keyed by user id. The
//! coordinator queries it after every session change; failures are
//! degraded to "no roles", never propagated to callers.

use std::future::Future;

use coverforge_identity::UserId;

/// Errors from the external role store.
///
/// These never reach consumers. The coordinator logs them and treats the
/// affected user as having no elevated capabilities — a fetch failure is
/// not an authentication failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("role store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed the query.
    #[error("role query failed: {0}")]
    Query(String),
}

/// Read access to role assignments.
pub trait RoleStore: Send + Sync + 'static {
    /// Returns the role labels assigned to the user.
    ///
    /// An empty list is a normal answer meaning "no roles". Labels are
    /// returned raw; the coordinator parses them and skips unknown ones.
    fn list_roles(
        &self,
        user: &UserId,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;
}
