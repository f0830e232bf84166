//! The portal: Coverforge's composition root.
//!
//! The portal is constructed exactly once at application startup. It
//! spawns the session/role coordinator, owns the directory data, and is
//! what the shell holds for its whole life. Teardown happens exactly once
//! at shutdown, cancelling the provider subscription.

use std::sync::Arc;

use coverforge_auth::{
    AuthConfig, AuthCoordinator, AuthHandle, IdentityProvider, RoleStore,
};
use coverforge_directory::{
    ActivityFeed, ActivityKind, CustomerBook, RenewalLedger,
};

use crate::guard::{self, Access};
use crate::nav::{self, NavItem, Route};
use crate::PortalError;

/// The window the dashboard calls "renewals due": next 30 days.
pub const RENEWAL_WINDOW_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for configuring and starting a [`Portal`].
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use coverforge::prelude::*;
/// use coverforge_auth::{MemoryIdentity, MemoryRoles};
///
/// let portal = Portal::builder(
///     Arc::new(MemoryIdentity::new()),
///     Arc::new(MemoryRoles::new()),
/// )
/// .auth_config(AuthConfig::default())
/// .build();
/// ```
pub struct PortalBuilder<P: IdentityProvider, R: RoleStore> {
    provider: Arc<P>,
    store: Arc<R>,
    config: AuthConfig,
    customers: CustomerBook,
    renewals: RenewalLedger,
    activity: ActivityFeed,
}

impl<P: IdentityProvider, R: RoleStore> PortalBuilder<P, R> {
    /// Creates a builder with empty directory data and default auth
    /// configuration.
    pub fn new(provider: Arc<P>, store: Arc<R>) -> Self {
        Self {
            provider,
            store,
            config: AuthConfig::default(),
            customers: CustomerBook::new(),
            renewals: RenewalLedger::new(),
            activity: ActivityFeed::new(),
        }
    }

    /// Sets the coordinator configuration.
    pub fn auth_config(mut self, config: AuthConfig) -> Self {
        self.config = config;
        self
    }

    /// Seeds the customer book.
    pub fn customers(mut self, customers: CustomerBook) -> Self {
        self.customers = customers;
        self
    }

    /// Seeds the renewal ledger.
    pub fn renewals(mut self, renewals: RenewalLedger) -> Self {
        self.renewals = renewals;
        self
    }

    /// Seeds the activity feed.
    pub fn activity(mut self, activity: ActivityFeed) -> Self {
        self.activity = activity;
        self
    }

    /// Spawns the coordinator and assembles the portal.
    pub fn build(self) -> Portal<P> {
        let auth =
            AuthCoordinator::spawn(self.provider, self.store, self.config);
        tracing::info!("portal assembled");
        Portal {
            auth,
            customers: self.customers,
            renewals: self.renewals,
            activity: self.activity,
        }
    }
}

// ---------------------------------------------------------------------------
// Portal
// ---------------------------------------------------------------------------

/// A running portal: the one object the shell holds.
pub struct Portal<P: IdentityProvider> {
    auth: AuthHandle<P>,
    customers: CustomerBook,
    renewals: RenewalLedger,
    activity: ActivityFeed,
}

impl<P: IdentityProvider> Portal<P> {
    /// Creates a builder.
    pub fn builder<R: RoleStore>(
        provider: Arc<P>,
        store: Arc<R>,
    ) -> PortalBuilder<P, R> {
        PortalBuilder::new(provider, store)
    }

    /// The authentication handle: snapshot, change stream, and the
    /// sign-in/sign-up/sign-out actions.
    pub fn auth(&self) -> &AuthHandle<P> {
        &self.auth
    }

    /// The customer book.
    pub fn customers(&self) -> &CustomerBook {
        &self.customers
    }

    /// Mutable access for record maintenance.
    pub fn customers_mut(&mut self) -> &mut CustomerBook {
        &mut self.customers
    }

    /// The renewal ledger.
    pub fn renewals(&self) -> &RenewalLedger {
        &self.renewals
    }

    /// Mutable access for record maintenance.
    pub fn renewals_mut(&mut self) -> &mut RenewalLedger {
        &mut self.renewals
    }

    /// The recent-activity feed.
    pub fn activity(&self) -> &ActivityFeed {
        &self.activity
    }

    /// Records a line in the activity feed.
    pub fn record_activity(
        &mut self,
        kind: ActivityKind,
        description: impl Into<String>,
    ) {
        self.activity.record(kind, description);
    }

    /// Renewals falling due inside the dashboard window.
    pub fn renewals_due_soon(&self) -> u64 {
        self.renewals.due_within(RENEWAL_WINDOW_DAYS).len() as u64
    }

    /// The sidebar for the current auth state.
    pub fn nav(&self) -> Vec<NavItem> {
        nav::nav_for(&self.auth.snapshot(), self.renewals_due_soon())
    }

    /// Access decision for a route against the current auth state.
    ///
    /// Call again after every auth state change — a `Defer` resolves once
    /// loading finishes, and redirects can change when roles arrive.
    pub fn access(&self, route: Route) -> Access {
        guard::evaluate(route, &self.auth.snapshot())
    }

    /// Stops the coordinator and cancels the provider subscription.
    ///
    /// # Errors
    /// [`AuthError::Closed`](coverforge_auth::AuthError::Closed) wrapped
    /// in [`PortalError::Auth`] if the portal was already shut down.
    pub async fn shutdown(&self) -> Result<(), PortalError> {
        self.auth.shutdown().await?;
        tracing::info!("portal shut down");
        Ok(())
    }
}
