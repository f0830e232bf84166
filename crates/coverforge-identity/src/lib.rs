//! Identity and role data model for Coverforge.
//!
//! This crate defines the types every other layer shares:
//!
//! - **Identity** ([`User`], [`Session`], [`UserId`]) — who is signed in
//!   and the credential proving it.
//! - **Events** ([`AuthEvent`], [`AuthChange`]) — session-change
//!   notifications delivered by an identity provider.
//! - **Roles** ([`Role`], [`RoleSet`], [`Capabilities`]) — what the signed-in
//!   user is allowed to do, derived from provider-assigned role labels.
//!
//! # Architecture
//!
//! The identity layer sits below everything else. It doesn't know about
//! providers, coordinators, or pages — it only defines the vocabulary they
//! speak.
//!
//! ```text
//! Provider (events) → Coordinator (state) → Consumers (guards, navigation)
//!          └───────────── all speak coverforge-identity ─────────────┘
//! ```

mod error;
mod role;
mod types;

pub use error::IdentityError;
pub use role::{Capabilities, Role, RoleSet};
pub use types::{AuthChange, AuthEvent, Session, User, UserId};
