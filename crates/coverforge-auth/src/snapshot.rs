//! The coordinator's state container.
//!
//! One `AuthSnapshot` value is the whole answer to "who is signed in and
//! what can they do, right now". Consumers receive it read-only through a
//! watch channel; only the coordinator mutates it.

use coverforge_identity::{Capabilities, Role, RoleSet, Session, User};
use std::fmt;

// ---------------------------------------------------------------------------
// AuthPhase
// ---------------------------------------------------------------------------

/// The coordinator's lifecycle state, derived from the snapshot.
///
/// ```text
/// Loading ──(no session found)────→ Anonymous
///    │                                  ↑
///    └──(session found)──→ Authenticated┘  (sign-out / expiry)
/// ```
///
/// There is no terminal state while the process runs; `Authenticated` and
/// `Anonymous` flip back and forth as sessions come and go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// No session determination has completed yet. Capability flags are
    /// not trustworthy; access-control decisions must defer.
    Loading,
    /// Determined: nobody is signed in. A valid state, not an error.
    Anonymous,
    /// Determined: a session is active. Roles may still be in flight.
    Authenticated,
}

impl fmt::Display for AuthPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Loading => "loading",
            Self::Anonymous => "anonymous",
            Self::Authenticated => "authenticated",
        };
        write!(f, "{label}")
    }
}

// ---------------------------------------------------------------------------
// AuthSnapshot
// ---------------------------------------------------------------------------

/// Immutable view of the coordinator's state at one instant.
///
/// Invariants:
/// - `loading` is true from construction until the first session
///   determination (initial check or first change event), then false for
///   the rest of the coordinator's life.
/// - `roles` is consistent with the *last* user a role fetch was issued
///   for. During the asynchronous gap between a session change and its
///   fetch completing, `roles` still reflects the previous user.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    session: Option<Session>,
    roles: RoleSet,
    loading: bool,
}

impl AuthSnapshot {
    /// The state a coordinator starts in: nothing known, `loading` set.
    pub(crate) fn initial() -> Self {
        Self {
            session: None,
            roles: RoleSet::new(),
            loading: true,
        }
    }

    /// The current session, if a user is signed in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The current user — present exactly when a session is.
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// True until the first session determination completes. Role fetches
    /// do not extend the loading phase.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The current user's role set. Empty while a fetch is outstanding
    /// for a brand-new sign-in, after a fetch failure, or for users with
    /// no assignments.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Derived capability flags for the current role set.
    pub fn capabilities(&self) -> Capabilities {
        self.roles.capabilities()
    }

    /// `admin` is present in the current role set.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(Role::Admin)
    }

    /// `broker` is present in the current role set.
    pub fn is_broker(&self) -> bool {
        self.roles.contains(Role::Broker)
    }

    /// `agent` is present in the current role set.
    pub fn is_agent(&self) -> bool {
        self.roles.contains(Role::Agent)
    }

    /// The lifecycle phase this snapshot represents.
    pub fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Loading
        } else if self.session.is_some() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        }
    }

    // -- Coordinator-only mutation --------------------------------------

    pub(crate) fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    pub(crate) fn set_roles(&mut self, roles: RoleSet) {
        self.roles = roles;
    }

    pub(crate) fn clear_roles(&mut self) {
        self.roles = RoleSet::new();
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.loading = false;
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            access_token: "tok".into(),
            expires_at: None,
            user: User::new("u1", "a@x.com"),
        }
    }

    #[test]
    fn test_initial_snapshot_is_loading_with_no_capabilities() {
        let snap = AuthSnapshot::initial();
        assert_eq!(snap.phase(), AuthPhase::Loading);
        assert!(snap.loading());
        assert!(snap.user().is_none());
        assert!(snap.capabilities().none());
    }

    #[test]
    fn test_phase_anonymous_after_determination_without_session() {
        let mut snap = AuthSnapshot::initial();
        snap.mark_loaded();
        assert_eq!(snap.phase(), AuthPhase::Anonymous);
    }

    #[test]
    fn test_phase_authenticated_with_session() {
        let mut snap = AuthSnapshot::initial();
        snap.set_session(Some(session()));
        snap.mark_loaded();
        assert_eq!(snap.phase(), AuthPhase::Authenticated);
        assert_eq!(snap.user().unwrap().email, "a@x.com");
    }

    #[test]
    fn test_capability_flags_track_role_set() {
        let mut snap = AuthSnapshot::initial();
        snap.set_session(Some(session()));
        snap.mark_loaded();

        let (roles, _) = RoleSet::from_labels(["agent", "broker"]);
        snap.set_roles(roles);

        assert!(snap.is_agent());
        assert!(snap.is_broker());
        assert!(!snap.is_admin());

        snap.clear_roles();
        assert!(snap.capabilities().none());
    }
}
