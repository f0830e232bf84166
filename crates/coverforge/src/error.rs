//! Unified error type for the Coverforge meta-crate.

use coverforge_auth::AuthError;
use coverforge_directory::DirectoryError;
use coverforge_identity::IdentityError;

/// Top-level error that wraps all crate-specific errors.
///
/// Application code using the `coverforge` meta-crate deals with this
/// single type; the `#[from]` impls let `?` convert sub-crate errors
/// automatically. Role-store errors are deliberately absent — the
/// coordinator swallows them, so they can never reach a caller.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// An authentication action failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Identity data could not be interpreted.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}
