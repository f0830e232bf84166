//! The identity-provider seam.
//!
//! Coverforge doesn't implement authentication itself — that's the job of
//! an external identity service. This module defines the
//! [`IdentityProvider`] trait the coordinator consumes: credential
//! operations plus a subscription that delivers a message every time the
//! session changes (sign-in, sign-out, token refresh).
//!
//! The subscription is an explicit message stream rather than a callback:
//! the provider pushes [`AuthChange`] values into a channel and the
//! coordinator pulls them from its own task. That keeps provider code from
//! ever running inside coordinator state updates — no hidden reentrancy.

use std::future::Future;

use coverforge_identity::{AuthChange, Session};
use tokio::sync::mpsc;

use crate::AuthError;

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A live registration for session-change notifications.
///
/// Dropping the subscription is the unsubscribe: the provider notices the
/// closed channel and stops delivering. The coordinator holds its
/// subscription for its whole life and drops it on teardown.
pub struct AuthSubscription {
    receiver: mpsc::UnboundedReceiver<AuthChange>,
}

impl AuthSubscription {
    /// Wraps the receiving half a provider delivers changes on.
    pub fn new(receiver: mpsc::UnboundedReceiver<AuthChange>) -> Self {
        Self { receiver }
    }

    /// Waits for the next session change.
    ///
    /// Returns `None` when the provider has gone away and no further
    /// changes can arrive.
    pub async fn next(&mut self) -> Option<AuthChange> {
        self.receiver.recv().await
    }
}

// ---------------------------------------------------------------------------
// Sign-up options
// ---------------------------------------------------------------------------

/// Options accompanying a registration request.
#[derive(Debug, Clone, Default)]
pub struct SignUpOptions {
    /// Where the user should land after confirming registration.
    pub redirect_to: Option<String>,
    /// Profile fields stored on the new account (display name, phone,
    /// agency, ...). Opaque to the coordinator.
    pub data: serde_json::Value,
}

impl SignUpOptions {
    /// Options with a post-confirmation landing target and no profile data.
    pub fn redirect(target: impl Into<String>) -> Self {
        Self {
            redirect_to: Some(target.into()),
            data: serde_json::Value::Null,
        }
    }
}

// ---------------------------------------------------------------------------
// IdentityProvider
// ---------------------------------------------------------------------------

/// The external identity service the coordinator rides on.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` — the provider is shared across the
///   coordinator task, role-fetch tasks, and every handle clone.
/// - Async methods return `impl Future + Send` so they can be awaited
///   inside spawned tasks. Implementations just write `async fn`.
///
/// # Contract
///
/// - `subscribe` must deliver every session change that happens after the
///   call, in causal order.
/// - `sign_up`/`sign_in_with_password` resolve with the provider's
///   verdict; the resulting session (if any) arrives via the
///   subscription, never as a return value.
/// - `sign_out` ends the current session; the subscription delivers the
///   empty-session change.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Registers for session-change notifications.
    fn subscribe(&self) -> AuthSubscription;

    /// The session the provider currently holds, if any. Used once at
    /// startup to restore state from before this process existed.
    fn current_session(
        &self,
    ) -> impl Future<Output = Result<Option<Session>, AuthError>> + Send;

    /// Registers a new account.
    ///
    /// # Errors
    /// [`AuthError::Rejected`] with the provider's message when the
    /// registration is refused (duplicate email, weak password, ...).
    fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: SignUpOptions,
    ) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Credential-based sign-in.
    ///
    /// # Errors
    /// [`AuthError::Rejected`] with the provider's message on bad
    /// credentials.
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Ends the current session.
    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>> + Send;
}
