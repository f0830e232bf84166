//! Identity types: users, sessions, and session-change events.
//!
//! A "session" is the provider-issued proof that a user is signed in. It
//! has a shorter lifetime than the account itself: created on sign-in,
//! replaced on token refresh, destroyed on sign-out or expiry. The `User`
//! is owned by the session — when the session goes away, so does the user.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a user account.
///
/// Opaque string issued by the identity provider (UUID-shaped in practice).
/// Newtype wrapper so a user id can't be confused with an email or a
/// session token in function signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Provider-issued account identifier.
    pub id: UserId,
    /// The email the account was registered with.
    pub email: String,
    /// Provider-supplied profile metadata (display name, phone, ...).
    /// Opaque to the coordination layer; consumers read the fields they
    /// care about.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl User {
    /// Creates a user with empty metadata.
    pub fn new(id: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            metadata: serde_json::Value::Null,
        }
    }
}

/// A provider-issued session: the credential bundle proving a user is
/// signed in.
///
/// Lifecycle:
///
/// ```text
/// sign-in / sign-up ──→ [active] ──(token refresh)──→ [active, new token]
///                           │
///                           └──(sign-out / expiry)──→ destroyed
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token for authenticated calls.
    pub access_token: String,
    /// Expiry as unix seconds. `None` when the provider did not report one.
    pub expires_at: Option<u64>,
    /// The user this session authenticates.
    pub user: User,
}

// ---------------------------------------------------------------------------
// Session-change events
// ---------------------------------------------------------------------------

/// Why the provider delivered a session change.
///
/// The wire labels mirror what hosted identity providers emit, so the
/// variants serialize as `"SIGNED_IN"`, `"SIGNED_OUT"`, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    /// The provider restored a session it already held at subscribe time.
    InitialSession,
    /// A credential sign-in (or confirmed registration) succeeded.
    SignedIn,
    /// The session ended: explicit sign-out or expiry.
    SignedOut,
    /// The session was replaced with a fresh access token.
    TokenRefreshed,
}

impl fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InitialSession => "initial_session",
            Self::SignedIn => "signed_in",
            Self::SignedOut => "signed_out",
            Self::TokenRefreshed => "token_refreshed",
        };
        write!(f, "{label}")
    }
}

/// One session-change notification: the event plus the session that is
/// current *after* the event (`None` after sign-out or expiry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthChange {
    /// What happened.
    pub event: AuthEvent,
    /// The now-current session, if any.
    pub session: Option<Session>,
}

impl AuthChange {
    /// The user carried by the new session, if one exists.
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn session_for(id: &str, email: &str) -> Session {
        Session {
            access_token: "tok".into(),
            expires_at: None,
            user: User::new(id, email),
        }
    }

    #[test]
    fn test_auth_event_serializes_as_wire_label() {
        let json = serde_json::to_string(&AuthEvent::SignedIn).unwrap();
        assert_eq!(json, "\"SIGNED_IN\"");

        let back: AuthEvent =
            serde_json::from_str("\"TOKEN_REFRESHED\"").unwrap();
        assert_eq!(back, AuthEvent::TokenRefreshed);
    }

    #[test]
    fn test_auth_change_user_present_for_session() {
        let change = AuthChange {
            event: AuthEvent::SignedIn,
            session: Some(session_for("u1", "a@x.com")),
        };
        assert_eq!(change.user().unwrap().email, "a@x.com");
    }

    #[test]
    fn test_auth_change_user_none_without_session() {
        let change = AuthChange {
            event: AuthEvent::SignedOut,
            session: None,
        };
        assert!(change.user().is_none());
    }

    #[test]
    fn test_user_metadata_defaults_to_null_when_absent() {
        // Providers omit metadata for bare accounts; deserialization
        // should not require the field.
        let user: User = serde_json::from_str(
            r#"{ "id": "u1", "email": "a@x.com" }"#,
        )
        .unwrap();
        assert!(user.metadata.is_null());
    }

    #[test]
    fn test_user_id_is_transparent_in_json() {
        let session = session_for("u-42", "a@x.com");
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["user"]["id"], "u-42");
    }
}
