//! Session and role coordination for Coverforge.
//!
//! This crate is the single process-wide authority for "who is signed in
//! and what can they do". It owns no UI and no network protocol — it sits
//! between an external identity provider and the consumers (route guards,
//! navigation, dashboards) that render against its state:
//!
//! 1. **Provider seams** — the [`IdentityProvider`] and [`RoleStore`]
//!    traits abstract the external services.
//! 2. **Coordination** — the [`AuthCoordinator`] actor consumes
//!    session-change events, issues role fetches, and maintains the
//!    [`AuthSnapshot`] state container.
//! 3. **Exposure** — consumers hold an [`AuthHandle`] and re-evaluate on
//!    every published snapshot.
//!
//! # How it fits in the stack
//!
//! ```text
//! Consumers (above)  ← guards/nav/dashboards read AuthSnapshot
//!     ↕
//! Coordination (this crate)  ← session state, role fetches, capabilities
//!     ↕
//! Identity layer (below)  ← User, Session, Role, AuthChange types
//! ```
//!
//! # Feature Flags
//!
//! - `memory` (default) — in-memory [`MemoryIdentity`]/[`MemoryRoles`]
//!   implementations of the provider seams, for development and tests.

mod config;
mod coordinator;
mod error;
#[cfg(feature = "memory")]
mod memory;
mod provider;
mod snapshot;
mod store;

pub use config::AuthConfig;
pub use coordinator::{AuthCoordinator, AuthHandle};
pub use error::AuthError;
#[cfg(feature = "memory")]
pub use memory::{MemoryIdentity, MemoryRoles};
pub use provider::{AuthSubscription, IdentityProvider, SignUpOptions};
pub use snapshot::{AuthPhase, AuthSnapshot};
pub use store::{RoleStore, StoreError};
