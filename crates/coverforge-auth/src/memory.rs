//! In-memory implementations of the provider seams.
//!
//! [`MemoryIdentity`] and [`MemoryRoles`] back the demo binary and any
//! test that needs a working provider without a network. They implement
//! the full contract: credential checks, session issuance, change
//! broadcasting, and role assignment — all in process memory.
//!
//! Not for production; a real deployment implements [`IdentityProvider`]
//! and [`RoleStore`] against a hosted identity service.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use coverforge_identity::{AuthChange, AuthEvent, Session, User, UserId};
use rand::Rng;
use tokio::sync::mpsc;

use crate::{
    AuthError, AuthSubscription, IdentityProvider, SignUpOptions,
};
use crate::store::{RoleStore, StoreError};

/// Session lifetime reported on issued sessions.
const SESSION_TTL_SECS: u64 = 3600;

// ---------------------------------------------------------------------------
// MemoryIdentity
// ---------------------------------------------------------------------------

/// A registered account.
struct Account {
    user_id: UserId,
    password: String,
    metadata: serde_json::Value,
    /// Landing target recorded at registration, for the shell to use
    /// after confirmation.
    redirect_to: Option<String>,
}

struct IdentityInner {
    /// Accounts keyed by email. One account per email.
    accounts: HashMap<String, Account>,
    session: Option<Session>,
    /// Live subscriptions. A closed channel means the subscriber dropped
    /// its end; it is pruned on the next broadcast.
    listeners: Vec<mpsc::UnboundedSender<AuthChange>>,
    next_user: u64,
}

/// In-memory identity provider.
pub struct MemoryIdentity {
    inner: Mutex<IdentityInner>,
}

impl MemoryIdentity {
    /// Creates a provider with no accounts and no session.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(IdentityInner {
                accounts: HashMap::new(),
                session: None,
                listeners: Vec::new(),
                next_user: 1,
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, IdentityInner> {
        // Lock is held only for map/vec operations, never across an await.
        self.inner.lock().expect("identity state poisoned")
    }

    /// Registers an account directly, without going through `sign_up` and
    /// without broadcasting. Bootstrap helper for demos and tests.
    pub fn seed_account(
        &self,
        email: &str,
        password: &str,
        metadata: serde_json::Value,
    ) -> UserId {
        let mut inner = self.inner();
        let user_id = UserId(format!("user-{}", inner.next_user));
        inner.next_user += 1;
        inner.accounts.insert(
            email.to_string(),
            Account {
                user_id: user_id.clone(),
                password: password.to_string(),
                metadata,
                redirect_to: None,
            },
        );
        user_id
    }

    /// Installs a session for an already-seeded account without
    /// broadcasting, as if it had been created before this process
    /// started. `current_session` will return it.
    ///
    /// Returns `None` if no account exists for the email.
    pub fn seed_session(&self, email: &str) -> Option<Session> {
        let mut inner = self.inner();
        let session = {
            let account = inner.accounts.get(email)?;
            build_session(account, email)
        };
        inner.session = Some(session.clone());
        Some(session)
    }

    /// Replaces the current session's access token and broadcasts the
    /// refresh, as a provider does when a token nears expiry.
    ///
    /// # Errors
    /// [`AuthError::Provider`] if nobody is signed in.
    pub fn refresh_session(&self) -> Result<(), AuthError> {
        let mut inner = self.inner();
        let refreshed = match inner.session.take() {
            Some(mut session) => {
                session.access_token = generate_token();
                session.expires_at = expiry_from_now();
                session
            }
            None => {
                return Err(AuthError::Provider(
                    "no active session to refresh".into(),
                ));
            }
        };
        inner.session = Some(refreshed.clone());
        broadcast(
            &mut inner,
            AuthEvent::TokenRefreshed,
            Some(refreshed),
        );
        Ok(())
    }

    /// The landing target recorded when the account registered, if any.
    pub fn redirect_target(&self, email: &str) -> Option<String> {
        self.inner()
            .accounts
            .get(email)
            .and_then(|a| a.redirect_to.clone())
    }
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for MemoryIdentity {
    fn subscribe(&self) -> AuthSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner().listeners.push(tx);
        AuthSubscription::new(rx)
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.inner().session.clone())
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: SignUpOptions,
    ) -> Result<(), AuthError> {
        let mut inner = self.inner();
        if inner.accounts.contains_key(email) {
            return Err(AuthError::Rejected(
                "User already registered".into(),
            ));
        }
        let user_id = UserId(format!("user-{}", inner.next_user));
        inner.next_user += 1;
        inner.accounts.insert(
            email.to_string(),
            Account {
                user_id,
                password: password.to_string(),
                metadata: options.data,
                redirect_to: options.redirect_to,
            },
        );
        // Registration alone issues no session; the account signs in with
        // its password afterwards and the change arrives by subscription.
        tracing::info!(email, "account registered");
        Ok(())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let mut inner = self.inner();
        let session = match inner.accounts.get(email) {
            Some(account) if account.password == password => {
                build_session(account, email)
            }
            // Same message for unknown email and wrong password; the
            // caller must not learn which one it was.
            _ => {
                return Err(AuthError::Rejected(
                    "Invalid login credentials".into(),
                ));
            }
        };
        inner.session = Some(session.clone());
        tracing::info!(email, "signed in");
        broadcast(&mut inner, AuthEvent::SignedIn, Some(session));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut inner = self.inner();
        if inner.session.take().is_some() {
            tracing::info!("signed out");
            broadcast(&mut inner, AuthEvent::SignedOut, None);
        }
        Ok(())
    }
}

/// Delivers a change to every live listener, pruning closed ones.
fn broadcast(
    inner: &mut IdentityInner,
    event: AuthEvent,
    session: Option<Session>,
) {
    inner.listeners.retain(|listener| {
        listener
            .send(AuthChange {
                event,
                session: session.clone(),
            })
            .is_ok()
    });
}

fn build_session(account: &Account, email: &str) -> Session {
    Session {
        access_token: generate_token(),
        expires_at: expiry_from_now(),
        user: User {
            id: account.user_id.clone(),
            email: email.to_string(),
            metadata: account.metadata.clone(),
        },
    }
}

fn expiry_from_now() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|now| now.as_secs() + SESSION_TTL_SECS)
}

/// Generates a random 32-character hex string (128 bits of entropy) used
/// as an access token.
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ---------------------------------------------------------------------------
// MemoryRoles
// ---------------------------------------------------------------------------

/// In-memory role store: raw labels keyed by user id.
///
/// Stores labels, not [`Role`](coverforge_identity::Role) values, on
/// purpose — the real store is a dumb table of strings, and the
/// coordinator is the layer that parses and filters them.
pub struct MemoryRoles {
    assignments: Mutex<HashMap<UserId, Vec<String>>>,
}

impl MemoryRoles {
    /// Creates a store with no assignments.
    pub fn new() -> Self {
        Self {
            assignments: Mutex::new(HashMap::new()),
        }
    }

    /// Assigns a role label to a user. Duplicates are stored as-is; the
    /// coordinator collapses them.
    pub fn assign(&self, user: &UserId, label: &str) {
        self.assignments
            .lock()
            .expect("role assignments poisoned")
            .entry(user.clone())
            .or_default()
            .push(label.to_string());
    }
}

impl Default for MemoryRoles {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleStore for MemoryRoles {
    async fn list_roles(
        &self,
        user: &UserId,
    ) -> Result<Vec<String>, StoreError> {
        Ok(self
            .assignments
            .lock()
            .expect("role assignments poisoned")
            .get(user)
            .cloned()
            .unwrap_or_default())
    }
}

// =========================================================================
// Tests
// =========================================================================
