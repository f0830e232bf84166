//! Route access policy.
//!
//! A decision is a pure function of the route and the current
//! [`AuthSnapshot`]. Two rules from the coordinator's contract matter
//! here:
//!
//! - While `loading` is true the capability flags are not yet
//!   trustworthy; protected routes get [`Access::Defer`], never a
//!   redirect that could bounce a legitimate admin to the wrong place.
//! - Role data can arrive *after* the session does, so consumers must
//!   re-evaluate on every published state change — a decision made at
//!   sign-in time is not final.

use coverforge_auth::{AuthPhase, AuthSnapshot};

use crate::nav::Route;

/// The outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// State is still loading; render nothing and check again on the
    /// next state change.
    Defer,
    /// Render the route.
    Grant,
    /// Navigate elsewhere.
    Redirect(Route),
}

/// Decides whether the current user may visit a route.
///
/// Policy:
/// - Public routes always render, except that Login/Signup bounce
///   already-authenticated users into the portal (admins to the admin
///   dashboard, everyone else to the agent dashboard).
/// - Protected routes defer while loading, send anonymous visitors to
///   Login, and send non-admins on admin routes to the agent dashboard.
pub fn evaluate(route: Route, snapshot: &AuthSnapshot) -> Access {
    let phase = snapshot.phase();

    if route.is_public() {
        if phase == AuthPhase::Authenticated
            && matches!(route, Route::Login | Route::Signup)
        {
            return Access::Redirect(portal_home(snapshot));
        }
        return Access::Grant;
    }

    match phase {
        AuthPhase::Loading => Access::Defer,
        AuthPhase::Anonymous => Access::Redirect(Route::Login),
        AuthPhase::Authenticated => {
            if route.requires_admin() && !snapshot.is_admin() {
                Access::Redirect(Route::Dashboard)
            } else {
                Access::Grant
            }
        }
    }
}

/// Where a signed-in user lands by default.
pub fn portal_home(snapshot: &AuthSnapshot) -> Route {
    if snapshot.is_admin() {
        Route::Admin
    } else {
        Route::Dashboard
    }
}
