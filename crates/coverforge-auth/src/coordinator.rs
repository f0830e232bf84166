//! The session/role coordinator: an actor owning authentication state.
//!
//! The coordinator runs in its own Tokio task and is the only writer of
//! [`AuthSnapshot`]. Everything reaches it as a message:
//!
//! ```text
//!  provider subscription ──AuthChange──┐
//!  initial-session task ───Initial─────┤
//!  role-fetch tasks ──RolesResolved────┼──→ actor ──→ watch<AuthSnapshot>
//!  handles ──Shutdown──────────────────┘                    │
//!                          ▲                                ▼
//!                          └──── spawns role fetches    consumers
//! ```
//!
//! # Startup
//!
//! Spawning subscribes to the provider first, then requests the current
//! session snapshot concurrently. Whichever path determines session
//! presence first ends the `loading` phase; role fetches never extend it.
//! If a live change event wins the race, a later-arriving startup snapshot
//! is discarded as stale.
//!
//! # Stale role fetches
//!
//! Role fetches resolve asynchronously and are never cancelled, so a fetch
//! for a previous session can complete after a newer session change (quick
//! sign-out/sign-in, or sign-out racing a pending fetch). Every applied
//! session change advances an epoch; each fetch carries the epoch it was
//! issued under, and results from an older epoch are dropped on arrival.

use std::sync::Arc;
use std::time::Duration;

use coverforge_identity::{AuthChange, RoleSet, Session, UserId};
use tokio::sync::{mpsc, oneshot, watch};

use crate::provider::AuthSubscription;
use crate::{
    AuthConfig, AuthError, AuthSnapshot, IdentityProvider, RoleStore,
    SignUpOptions, StoreError,
};

/// Messages processed by the coordinator actor.
enum CoordinatorMsg {
    /// Result of the startup current-session request.
    Initial {
        outcome: Result<Option<Session>, AuthError>,
    },

    /// A role fetch finished.
    RolesResolved {
        user_id: UserId,
        /// The session epoch the fetch was issued under.
        epoch: u64,
        outcome: Result<Vec<String>, StoreError>,
    },

    /// Stop the actor and cancel the provider subscription.
    Shutdown { ack: oneshot::Sender<()> },
}

// ---------------------------------------------------------------------------
// AuthCoordinator
// ---------------------------------------------------------------------------

/// Spawns the coordinator actor.
///
/// There is exactly one coordinator per process, constructed by the
/// composition root at startup. Consumers never construct one; they are
/// handed an [`AuthHandle`].
pub struct AuthCoordinator;

impl AuthCoordinator {
    /// Subscribes to the provider, kicks off the initial session check,
    /// and starts the actor. Returns the handle consumers share.
    pub fn spawn<P, R>(
        provider: Arc<P>,
        store: Arc<R>,
        config: AuthConfig,
    ) -> AuthHandle<P>
    where
        P: IdentityProvider,
        R: RoleStore,
    {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(AuthSnapshot::initial());

        // Subscribe before the snapshot request so no change that happens
        // in between can be missed.
        let subscription = provider.subscribe();

        {
            let provider = Arc::clone(&provider);
            let tx = msg_tx.clone();
            tokio::spawn(async move {
                let outcome = provider.current_session().await;
                let _ = tx.send(CoordinatorMsg::Initial { outcome });
            });
        }

        let actor = Coordinator {
            subscription,
            msg_rx,
            msg_tx: msg_tx.clone(),
            store,
            config,
            state_tx,
            snapshot: AuthSnapshot::initial(),
            epoch: 0,
            saw_change: false,
        };
        tokio::spawn(actor.run());

        AuthHandle {
            provider,
            control: msg_tx,
            state: state_rx,
        }
    }
}

// ---------------------------------------------------------------------------
// AuthHandle
// ---------------------------------------------------------------------------

/// Shared handle to the coordinator: read access to the state plus the
/// authentication actions.
///
/// Cheap to clone; every consumer (guards, navigation, dashboards) holds
/// one. Consumers are read-only observers — all mutation goes through the
/// actor.
pub struct AuthHandle<P: IdentityProvider> {
    provider: Arc<P>,
    control: mpsc::UnboundedSender<CoordinatorMsg>,
    state: watch::Receiver<AuthSnapshot>,
}

impl<P: IdentityProvider> Clone for AuthHandle<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            control: self.control.clone(),
            state: self.state.clone(),
        }
    }
}

impl<P: IdentityProvider> AuthHandle<P> {
    /// The current state: user, session, loading flag, capabilities.
    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every published state change.
    ///
    /// Consumers making access decisions must re-evaluate on every
    /// notification, not just the first: role data can arrive after the
    /// session does.
    pub fn changes(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.clone()
    }

    /// Registers a new account with the provider.
    ///
    /// Does not change coordinator state; if registration leads to a
    /// session, that arrives later through the subscription.
    ///
    /// # Errors
    /// The provider's refusal, with its human-readable message.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: SignUpOptions,
    ) -> Result<(), AuthError> {
        self.provider.sign_up(email, password, options).await
    }

    /// Credential sign-in via the provider.
    ///
    /// Resolves with the provider's verdict only. State is untouched on
    /// failure and updated asynchronously via the subscription on success.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        self.provider.sign_in_with_password(email, password).await
    }

    /// Ends the current session. The subscription delivers the
    /// empty-session change that clears user and roles.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await
    }

    /// Stops the actor and cancels the provider subscription. Resolves
    /// once teardown is complete.
    ///
    /// # Errors
    /// [`AuthError::Closed`] if the coordinator already stopped.
    pub async fn shutdown(&self) -> Result<(), AuthError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.control
            .send(CoordinatorMsg::Shutdown { ack: ack_tx })
            .map_err(|_| AuthError::Closed)?;
        ack_rx.await.map_err(|_| AuthError::Closed)
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// The internal actor state. Runs inside a Tokio task.
struct Coordinator<R: RoleStore> {
    subscription: AuthSubscription,
    msg_rx: mpsc::UnboundedReceiver<CoordinatorMsg>,
    /// Handed to role-fetch tasks so results come back as messages.
    msg_tx: mpsc::UnboundedSender<CoordinatorMsg>,
    store: Arc<R>,
    config: AuthConfig,
    state_tx: watch::Sender<AuthSnapshot>,
    snapshot: AuthSnapshot,
    /// Advances on every applied session determination. Role-fetch
    /// results carrying an older epoch are stale and discarded.
    epoch: u64,
    /// Whether a live subscription event has been applied. Once true, the
    /// startup snapshot (if still in flight) is stale by causality.
    saw_change: bool,
}

impl<R: RoleStore> Coordinator<R> {
    /// Runs the actor loop until shutdown or until the provider drops the
    /// subscription.
    async fn run(mut self) {
        tracing::debug!("auth coordinator started");

        loop {
            tokio::select! {
                change = self.subscription.next() => {
                    match change {
                        Some(change) => self.handle_change(change),
                        None => {
                            tracing::warn!(
                                "auth subscription closed by provider"
                            );
                            break;
                        }
                    }
                }
                msg = self.msg_rx.recv() => {
                    match msg {
                        Some(CoordinatorMsg::Initial { outcome }) => {
                            self.handle_initial(outcome);
                        }
                        Some(CoordinatorMsg::RolesResolved {
                            user_id,
                            epoch,
                            outcome,
                        }) => {
                            self.handle_roles(user_id, epoch, outcome);
                        }
                        Some(CoordinatorMsg::Shutdown { ack }) => {
                            tracing::debug!("auth coordinator shutting down");
                            let _ = ack.send(());
                            break;
                        }
                        None => break,
                    }
                }
            }
        }

        // Dropping `self.subscription` here is the unsubscribe.
        tracing::debug!("auth coordinator stopped");
    }

    /// Applies a session change delivered by the subscription.
    fn handle_change(&mut self, change: AuthChange) {
        tracing::info!(
            event = %change.event,
            user = change.user().map(|u| u.email.as_str()).unwrap_or("-"),
            "session change"
        );
        self.saw_change = true;
        self.apply_session(change.session, self.config.role_fetch_delay);
    }

    /// Applies the startup current-session result, unless a live event
    /// already determined the session.
    fn handle_initial(&mut self, outcome: Result<Option<Session>, AuthError>) {
        if self.saw_change {
            tracing::debug!(
                "initial session snapshot superseded by live event"
            );
            return;
        }
        match outcome {
            Ok(session) => {
                tracing::info!(
                    present = session.is_some(),
                    "initial session check"
                );
                self.apply_session(session, Duration::ZERO);
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "initial session check failed, treating as signed out"
                );
                self.apply_session(None, Duration::ZERO);
            }
        }
    }

    /// The single session-determination path: updates the snapshot,
    /// schedules the role fetch, and ends the loading phase.
    fn apply_session(&mut self, session: Option<Session>, delay: Duration) {
        self.epoch += 1;
        let user_id = session.as_ref().map(|s| s.user.id.clone());
        self.snapshot.set_session(session);

        match user_id {
            Some(user_id) => {
                // Prior roles are intentionally kept until the fetch
                // resolves; clearing here would drop capabilities during
                // a token refresh for the same user.
                self.spawn_role_fetch(user_id, delay);
            }
            None => self.snapshot.clear_roles(),
        }

        self.snapshot.mark_loaded();
        self.publish();
    }

    /// Issues the role fetch for a user, tagged with the current epoch.
    ///
    /// The fetch is never cancelled; a stale result is discarded when it
    /// arrives instead.
    fn spawn_role_fetch(&self, user_id: UserId, delay: Duration) {
        let store = Arc::clone(&self.store);
        let tx = self.msg_tx.clone();
        let epoch = self.epoch;
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let outcome = store.list_roles(&user_id).await;
            let _ = tx.send(CoordinatorMsg::RolesResolved {
                user_id,
                epoch,
                outcome,
            });
        });
    }

    /// Applies a role-fetch result, or discards it if a newer session
    /// determination happened while it was in flight.
    fn handle_roles(
        &mut self,
        user_id: UserId,
        epoch: u64,
        outcome: Result<Vec<String>, StoreError>,
    ) {
        if epoch != self.epoch {
            tracing::debug!(
                %user_id,
                fetch_epoch = epoch,
                current_epoch = self.epoch,
                "discarding stale role fetch"
            );
            return;
        }

        match outcome {
            Ok(labels) => {
                let (roles, unknown) =
                    RoleSet::from_labels(labels.iter().map(String::as_str));
                for label in &unknown {
                    tracing::debug!(
                        %user_id,
                        label,
                        "ignoring unknown role label"
                    );
                }
                tracing::info!(
                    %user_id,
                    roles = roles.len(),
                    "roles resolved"
                );
                self.snapshot.set_roles(roles);
            }
            Err(e) => {
                // Not an authentication failure: the user stays signed in
                // with no elevated capabilities.
                tracing::warn!(
                    %user_id,
                    error = %e,
                    "role fetch failed, treating as no roles"
                );
                self.snapshot.clear_roles();
            }
        }

        self.publish();
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.snapshot.clone());
    }
}
