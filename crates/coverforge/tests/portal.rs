//! Integration tests for the portal: guard decisions, navigation, and
//! lifecycle, driven end-to-end through the in-memory provider.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use coverforge::prelude::*;
use coverforge_auth::{AuthSubscription, MemoryIdentity, MemoryRoles};
use tokio::sync::mpsc;

// =========================================================================
// Helpers
// =========================================================================

/// A provider whose startup session check never resolves, pinning the
/// coordinator in the loading phase.
struct HangingProvider {
    keep: Mutex<Vec<mpsc::UnboundedSender<AuthChange>>>,
}

impl HangingProvider {
    fn new() -> Self {
        Self {
            keep: Mutex::new(Vec::new()),
        }
    }
}

impl IdentityProvider for HangingProvider {
    fn subscribe(&self) -> AuthSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        // Keep the sender so the subscription stays open.
        self.keep.lock().unwrap().push(tx);
        AuthSubscription::new(rx)
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        std::future::pending::<()>().await;
        Ok(None)
    }

    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        _options: SignUpOptions,
    ) -> Result<(), AuthError> {
        Ok(())
    }

    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<(), AuthError> {
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

/// Zero-delay config so tests that don't care about the fetch gap resolve
/// immediately.
fn instant_config() -> AuthConfig {
    AuthConfig {
        role_fetch_delay: Duration::ZERO,
    }
}

/// A ledger with two renewals inside the 30-day window and one outside.
fn seeded_renewals() -> RenewalLedger {
    let mut ledger = RenewalLedger::new();
    for (id, days_left) in [(1, 17), (2, 20), (3, 34)] {
        ledger.insert(Renewal {
            id: RenewalId(id),
            customer: format!("Customer {id}"),
            policy: format!("AUTO-2024-{id:03}"),
            premium: 78_000,
            days_left,
            priority: Priority::High,
            status: RenewalStatus::Pending,
        });
    }
    ledger
}

/// An identity provider with one agent and one admin account, and the
/// role store to match.
fn seeded_identity() -> (Arc<MemoryIdentity>, Arc<MemoryRoles>) {
    let identity = Arc::new(MemoryIdentity::new());
    let roles = Arc::new(MemoryRoles::new());

    let agent = identity.seed_account(
        "agent@coverforge.test",
        "agent-pw",
        serde_json::json!({ "display_name": "John Doe" }),
    );
    roles.assign(&agent, "agent");

    let admin = identity.seed_account(
        "admin@coverforge.test",
        "admin-pw",
        serde_json::Value::Null,
    );
    roles.assign(&admin, "admin");

    (identity, roles)
}

/// Waits (bounded) until the auth snapshot satisfies the predicate.
async fn wait_for<P, F>(handle: &AuthHandle<P>, pred: F) -> AuthSnapshot
where
    P: IdentityProvider,
    F: Fn(&AuthSnapshot) -> bool,
{
    let mut rx = handle.changes();
    tokio::time::timeout(Duration::from_secs(2), async move {
        loop {
            {
                let snap = rx.borrow_and_update().clone();
                if pred(&snap) {
                    return snap;
                }
            }
            rx.changed().await.expect("coordinator stopped");
        }
    })
    .await
    .expect("timed out waiting for auth state")
}

// =========================================================================
// Guard decisions
// =========================================================================

#[tokio::test]
async fn test_protected_routes_defer_while_loading() {
    let portal = Portal::builder(
        Arc::new(HangingProvider::new()),
        Arc::new(MemoryRoles::new()),
    )
    .auth_config(instant_config())
    .build();

    // Nothing has determined the session; flags are untrustworthy.
    tokio::time::sleep(Duration::from_millis(30)).await;

    assert_eq!(portal.access(Route::Customers), Access::Defer);
    assert_eq!(portal.access(Route::Admin), Access::Defer);
    // Public routes render regardless.
    assert_eq!(portal.access(Route::Landing), Access::Grant);
    assert_eq!(portal.access(Route::Login), Access::Grant);
    // No sidebar while loading.
    assert!(portal.nav().is_empty());
}

#[tokio::test]
async fn test_anonymous_visitor_redirected_to_login() {
    let (identity, roles) = seeded_identity();
    let portal = Portal::builder(identity, roles)
        .auth_config(instant_config())
        .build();
    wait_for(portal.auth(), |s| !s.loading()).await;

    assert_eq!(portal.access(Route::Customers), Access::Redirect(Route::Login));
    assert_eq!(portal.access(Route::Admin), Access::Redirect(Route::Login));
    assert_eq!(portal.access(Route::Landing), Access::Grant);
    assert!(portal.nav().is_empty());
}

#[tokio::test]
async fn test_agent_granted_portal_denied_admin() {
    let (identity, roles) = seeded_identity();
    let portal = Portal::builder(Arc::clone(&identity), roles)
        .auth_config(instant_config())
        .renewals(seeded_renewals())
        .build();

    portal
        .auth()
        .sign_in("agent@coverforge.test", "agent-pw")
        .await
        .expect("sign-in should succeed");
    wait_for(portal.auth(), |s| s.is_agent()).await;

    assert_eq!(portal.access(Route::Customers), Access::Grant);
    assert_eq!(portal.access(Route::Renewals), Access::Grant);
    assert_eq!(
        portal.access(Route::Admin),
        Access::Redirect(Route::Dashboard)
    );
    // Already signed in: the login page bounces into the portal.
    assert_eq!(
        portal.access(Route::Login),
        Access::Redirect(Route::Dashboard)
    );
}

#[tokio::test]
async fn test_admin_redirect_reevaluated_after_late_role_arrival() {
    // Roles resolve 100 ms after the session: the redirect target for an
    // admin changes once the role set lands, so consumers re-evaluating
    // on state changes end up in the right place.
    let (identity, roles) = seeded_identity();
    let portal = Portal::builder(Arc::clone(&identity), roles)
        .auth_config(AuthConfig {
            role_fetch_delay: Duration::from_millis(100),
        })
        .build();

    portal
        .auth()
        .sign_in("admin@coverforge.test", "admin-pw")
        .await
        .unwrap();
    wait_for(portal.auth(), |s| s.user().is_some()).await;

    // Session known, roles still in flight: treated as non-admin.
    assert_eq!(
        portal.access(Route::Login),
        Access::Redirect(Route::Dashboard)
    );
    assert_eq!(
        portal.access(Route::Admin),
        Access::Redirect(Route::Dashboard)
    );

    wait_for(portal.auth(), |s| s.is_admin()).await;

    // Re-evaluation after the role update lands on the admin surfaces.
    assert_eq!(portal.access(Route::Login), Access::Redirect(Route::Admin));
    assert_eq!(portal.access(Route::Admin), Access::Grant);
}

#[tokio::test]
async fn test_sign_out_returns_portal_to_anonymous() {
    let (identity, roles) = seeded_identity();
    let portal = Portal::builder(Arc::clone(&identity), roles)
        .auth_config(instant_config())
        .build();

    portal
        .auth()
        .sign_in("agent@coverforge.test", "agent-pw")
        .await
        .unwrap();
    wait_for(portal.auth(), |s| s.is_agent()).await;

    portal.auth().sign_out().await.unwrap();
    wait_for(portal.auth(), |s| s.user().is_none()).await;

    assert_eq!(portal.access(Route::Customers), Access::Redirect(Route::Login));
    assert!(portal.nav().is_empty());
}

// =========================================================================
// Navigation
// =========================================================================

#[tokio::test]
async fn test_agent_nav_carries_renewals_badge() {
    let (identity, roles) = seeded_identity();
    let portal = Portal::builder(Arc::clone(&identity), roles)
        .auth_config(instant_config())
        .renewals(seeded_renewals())
        .build();

    portal
        .auth()
        .sign_in("agent@coverforge.test", "agent-pw")
        .await
        .unwrap();
    wait_for(portal.auth(), |s| s.is_agent()).await;

    let nav = portal.nav();
    let labels: Vec<&str> = nav.iter().map(|i| i.label).collect();
    assert_eq!(
        labels,
        vec![
            "Dashboard",
            "Customers",
            "Policies",
            "Scan Document",
            "Renewals",
            "Analytics",
            "Settings"
        ]
    );
    let renewals = nav.iter().find(|i| i.route == Route::Renewals).unwrap();
    assert_eq!(renewals.badge, Some(2), "two renewals inside 30 days");
}

#[tokio::test]
async fn test_admin_nav_for_admin_user() {
    let (identity, roles) = seeded_identity();
    let portal = Portal::builder(Arc::clone(&identity), roles)
        .auth_config(instant_config())
        .build();

    portal
        .auth()
        .sign_in("admin@coverforge.test", "admin-pw")
        .await
        .unwrap();
    wait_for(portal.auth(), |s| s.is_admin()).await;

    let nav = portal.nav();
    assert!(nav.iter().all(|i| i.route.requires_admin()));
    assert!(nav.iter().any(|i| i.label == "Manage Brokers"));
}

// =========================================================================
// Lifecycle
// =========================================================================

#[tokio::test]
async fn test_shutdown_tears_down_exactly_once() {
    let (identity, roles) = seeded_identity();
    let portal = Portal::builder(identity, roles)
        .auth_config(instant_config())
        .build();
    wait_for(portal.auth(), |s| !s.loading()).await;

    portal.shutdown().await.expect("first shutdown succeeds");

    assert!(matches!(
        portal.shutdown().await,
        Err(PortalError::Auth(AuthError::Closed))
    ));
}
