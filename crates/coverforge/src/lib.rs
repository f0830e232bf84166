//! # Coverforge
//!
//! Headless core of an insurance-broker CRM. Coverforge owns everything a
//! rendering shell needs but none of the rendering: who is signed in and
//! what they can do ([`coverforge_auth`]), which routes they may visit
//! ([`guard`]), what the navigation shows ([`nav`]), and the numbers the
//! dashboard pages display ([`coverforge_directory`]).
//!
//! The [`Portal`] is the composition root: it constructs the session/role
//! coordinator once at startup, owns the directory data, and tears the
//! coordinator down once at shutdown.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use coverforge::prelude::*;
//! use coverforge_auth::{MemoryIdentity, MemoryRoles};
//!
//! # async fn run() -> Result<(), PortalError> {
//! let identity = Arc::new(MemoryIdentity::new());
//! let roles = Arc::new(MemoryRoles::new());
//!
//! let portal = Portal::builder(identity, roles).build();
//!
//! portal.auth().sign_in("agent@example.com", "secret").await?;
//! match portal.access(Route::Customers) {
//!     Access::Grant => { /* render the page */ }
//!     Access::Defer => { /* show the spinner */ }
//!     Access::Redirect(to) => { /* navigate to `to` */ }
//! }
//! portal.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod guard;
pub mod nav;
mod portal;

pub use error::PortalError;
pub use guard::Access;
pub use nav::{NavItem, Route};
pub use portal::{Portal, PortalBuilder};

/// The common imports for building on Coverforge.
pub mod prelude {
    pub use coverforge_auth::{
        AuthConfig, AuthCoordinator, AuthError, AuthHandle, AuthPhase,
        AuthSnapshot, IdentityProvider, RoleStore, SignUpOptions,
    };
    pub use coverforge_directory::{
        Activity, ActivityFeed, ActivityKind, Customer, CustomerBook,
        CustomerId, CustomerStats, CustomerStatus, Priority, Renewal,
        RenewalId, RenewalLedger, RenewalStatus, Urgency,
    };
    pub use coverforge_identity::{
        AuthChange, AuthEvent, Capabilities, Role, RoleSet, Session, User,
        UserId,
    };

    pub use crate::guard::Access;
    pub use crate::nav::{NavItem, Route};
    pub use crate::{Portal, PortalBuilder, PortalError};
}
