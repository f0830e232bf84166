//! Broker portal demo.
//!
//! Wires the portal against the in-memory identity provider and walks the
//! whole session lifecycle: anonymous visitor, failed sign-in, an agent
//! session, an admin session with a token refresh, and sign-out.
//!
//! Run with `cargo run -p broker-portal` (set `RUST_LOG=debug` to watch
//! the coordinator work).

mod seed;

use std::sync::Arc;
use std::time::Duration;

use coverforge::prelude::*;
use coverforge_auth::{MemoryIdentity, MemoryRoles};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), PortalError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // -- Provider setup ---------------------------------------------------
    let identity = Arc::new(MemoryIdentity::new());
    let roles = Arc::new(MemoryRoles::new());

    let agent = identity.seed_account(
        "agent@coverforge.dev",
        "agent-pw",
        serde_json::json!({ "display_name": "John Doe", "title": "Senior Agent" }),
    );
    roles.assign(&agent, "agent");

    let admin = identity.seed_account(
        "admin@coverforge.dev",
        "admin-pw",
        serde_json::json!({ "display_name": "Asha Rao" }),
    );
    roles.assign(&admin, "admin");
    roles.assign(&admin, "broker");

    let portal = Portal::builder(Arc::clone(&identity), roles)
        .customers(seed::customers())
        .renewals(seed::renewals())
        .activity(seed::activity())
        .build();

    // -- Anonymous visitor ------------------------------------------------
    wait_until(portal.auth(), |s| !s.loading()).await;
    println!("== visitor ==");
    show_access(&portal, &[Route::Landing, Route::Dashboard, Route::Admin]);

    let err = portal
        .auth()
        .sign_in("agent@coverforge.dev", "wrong-password")
        .await
        .expect_err("bad password must be refused");
    println!("sign-in refused: {err}");

    // -- Agent session ----------------------------------------------------
    portal
        .auth()
        .sign_in("agent@coverforge.dev", "agent-pw")
        .await?;
    let snap = wait_until(portal.auth(), |s| s.is_agent()).await;
    println!(
        "\n== agent session: {} ==",
        snap.user().map(|u| u.email.as_str()).unwrap_or("-")
    );
    show_access(&portal, &[Route::Dashboard, Route::Renewals, Route::Admin]);
    show_nav(&portal);

    let hits = portal.customers().search("john");
    println!("search \"john\": {} customers", hits.len());
    for customer in hits {
        println!("  {} <{}> [{}]", customer.name, customer.email, customer.status);
    }
    let stats = portal.customers().stats();
    println!(
        "book: {} customers, {} active, {} policies, ${} premium",
        stats.total, stats.active, stats.total_policies, stats.total_premium
    );
    println!(
        "renewals due in 30 days: {} (premium at risk: {})",
        portal.renewals_due_soon(),
        portal.renewals().premium_at_risk(30)
    );
    for activity in portal.activity().recent(3) {
        println!("  [{}] {}", activity.kind, activity.description);
    }

    portal.auth().sign_out().await?;
    wait_until(portal.auth(), |s| s.user().is_none()).await;

    // -- Admin session ----------------------------------------------------
    portal
        .auth()
        .sign_in("admin@coverforge.dev", "admin-pw")
        .await?;
    let snap = wait_until(portal.auth(), |s| s.is_admin()).await;
    println!(
        "\n== admin session: {} (capabilities: {:?}) ==",
        snap.user().map(|u| u.email.as_str()).unwrap_or("-"),
        snap.capabilities()
    );
    show_access(&portal, &[Route::Admin, Route::AdminBrokers, Route::Login]);
    show_nav(&portal);

    // A token refresh replaces the session but keeps the capabilities.
    identity
        .refresh_session()
        .map_err(PortalError::Auth)?;
    tokio::time::sleep(Duration::from_millis(120)).await;
    println!("after refresh: still admin = {}", portal.auth().snapshot().is_admin());

    portal.auth().sign_out().await?;
    wait_until(portal.auth(), |s| s.user().is_none()).await;
    println!("\nsigned out; portal back to anonymous");

    portal.shutdown().await
}

/// Blocks until the auth snapshot satisfies the predicate.
async fn wait_until<P, F>(handle: &AuthHandle<P>, pred: F) -> AuthSnapshot
where
    P: IdentityProvider,
    F: Fn(&AuthSnapshot) -> bool,
{
    let mut rx = handle.changes();
    loop {
        {
            let snap = rx.borrow_and_update().clone();
            if pred(&snap) {
                return snap;
            }
        }
        rx.changed().await.expect("coordinator stopped");
    }
}

fn show_access<P: IdentityProvider>(portal: &Portal<P>, routes: &[Route]) {
    for route in routes {
        let decision = match portal.access(*route) {
            Access::Grant => "grant".to_string(),
            Access::Defer => "defer".to_string(),
            Access::Redirect(to) => format!("redirect -> {to}"),
        };
        println!("  {route}: {decision}");
    }
}

fn show_nav<P: IdentityProvider>(portal: &Portal<P>) {
    println!("navigation:");
    for item in portal.nav() {
        match item.badge {
            Some(badge) => println!("  {} ({badge}) -> {}", item.label, item.route),
            None => println!("  {} -> {}", item.label, item.route),
        }
    }
}
