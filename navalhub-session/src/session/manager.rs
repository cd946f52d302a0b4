//! Session Manager - Owner of the authentication state machine
//!
//! Mirrors the session store on startup and keeps it in step on every login and
//! logout. Storage writes always complete before the matching state is published,
//! so observers never see a state the store does not back.
//!
//! Every store write and the publish that follows it run under one commit lock.
//! A login suspended in the verifier does not hold it, so a logout issued during
//! that wait runs straight away and the login commits after it. While a re-login
//! is mid-commit the store already reads as logged out but memory still shows the
//! previous session; no manager operation can observe that store until the commit
//! finishes.

use super::store::{FileSessionStore, SessionStore};
use super::types::{keys, SessionState};
use crate::auth::{CredentialVerifier, Credentials, Role, StandInVerifier, UserProfile};
use crate::SessionResult;
use navalhub_core::{performance, validation_error, SessionSettings};
use std::sync::{Arc, MutexGuard};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// Single writer of the session state
pub struct SessionManager {
    /// Durable session record
    store: Arc<dyn SessionStore>,
    /// Credential check run before a session is opened
    verifier: Arc<dyn CredentialVerifier>,
    /// Published state; the sender never leaves this struct
    state: watch::Sender<SessionState>,
    /// Serializes overlapping login calls
    login_gate: Mutex<()>,
    /// Held across each store write and its publish; never held across an await
    commit_lock: std::sync::Mutex<()>,
}

impl SessionManager {
    /// Create a manager in the `Unauthenticated` state without reading the store
    pub fn new(store: Arc<dyn SessionStore>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);

        Self {
            store,
            verifier,
            state,
            login_gate: Mutex::new(()),
            commit_lock: std::sync::Mutex::new(()),
        }
    }

    /// Create a manager and restore any persisted session (startup path)
    pub fn open(
        store: Arc<dyn SessionStore>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> SessionResult<Self> {
        let manager = Self::new(store, verifier);
        manager.restore()?;
        Ok(manager)
    }

    /// Open a manager over the durable per-origin store described by `settings`
    pub fn from_settings(settings: &SessionSettings) -> SessionResult<Self> {
        let store = FileSessionStore::for_origin(settings.expand_storage_dir(), &settings.origin)?;
        let verifier = StandInVerifier::from_millis(settings.login_delay_ms);

        Self::open(Arc::new(store), Arc::new(verifier))
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user().cloned()
    }

    /// Receive every published state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Rebuild the in-memory state from the session store.
    ///
    /// A marked record with no role is healed to `administrative`; a legacy role
    /// alias is rewritten in canonical form. A record with an unknown role is
    /// cleared and the state stays `Unauthenticated`.
    pub fn restore(&self) -> SessionResult<SessionState> {
        let _commit = self.commit_guard();
        let record = self.store.load_record()?;

        if !record.is_marked() {
            debug!("No open session in store");
            self.publish(SessionState::Unauthenticated);
            return Ok(SessionState::Unauthenticated);
        }

        let role = match record.role.as_deref() {
            None => {
                warn!("Session record has no role, defaulting to administrative");
                self.store
                    .set(keys::AUTH_ROLE, Role::Administrative.as_str())?;
                Role::Administrative
            }
            Some(stored) => match Role::parse_with_alias(stored) {
                Ok((role, false)) => role,
                Ok((role, true)) => {
                    warn!(stored, canonical = %role, "Rewriting legacy role alias");
                    self.store.set(keys::AUTH_ROLE, role.as_str())?;
                    role
                }
                Err(_) => {
                    validation_error!(
                        format!("Discarding session record with unknown role: {}", stored),
                        keys::AUTH_ROLE,
                        "session_manager"
                    )
                    .log();
                    self.clear_record()?;
                    self.publish(SessionState::Unauthenticated);
                    return Ok(SessionState::Unauthenticated);
                }
            },
        };

        let user = UserProfile::for_role(role, record.email.as_deref());
        let state = SessionState::Authenticated(user);
        info!("Restored session: {}", state.summary());

        self.publish(state.clone());
        Ok(state)
    }

    /// Verify credentials, persist the session record, then publish `Authenticated`.
    ///
    /// Overlapping calls are queued and run one after another. A rejection from
    /// the verifier leaves both the store and the state untouched.
    pub async fn login(&self, credentials: Credentials) -> SessionResult<UserProfile> {
        let _gate = self.login_gate.lock().await;

        info!(
            email = %credentials.email,
            role = %credentials.role,
            "Login started"
        );

        if let Err(e) =
            performance::measure_async("credential_check", self.verifier.verify(&credentials))
                .await
        {
            warn!(error = %e, role = %credentials.role, "Login rejected");
            return Err(e);
        }

        let user = self.commit_login(&credentials)?;
        info!("Login completed: {}", user.display_string());

        Ok(user)
    }

    /// Remove the session record, then publish `Unauthenticated`.
    ///
    /// Every key removal is attempted; the state is cleared even if one fails,
    /// and the first failure is returned.
    pub fn logout(&self) -> SessionResult<()> {
        let _commit = self.commit_guard();
        let result = self.clear_record();

        let previous = self.state.send_replace(SessionState::Unauthenticated);
        if previous.is_authenticated() {
            info!("Logged out: {}", previous.summary());
        } else {
            debug!("Logout requested while unauthenticated");
        }

        result
    }

    fn commit_login(&self, credentials: &Credentials) -> SessionResult<UserProfile> {
        let _commit = self.commit_guard();

        if let Err(e) = self.persist_login(credentials) {
            // The auth marker is gone at this point, so the store reads as logged out
            warn!(error = %e, "Failed to persist session record");
            self.publish(SessionState::Unauthenticated);
            return Err(e);
        }

        let user = UserProfile::for_role(credentials.role, Some(&credentials.email));
        self.publish(SessionState::Authenticated(user.clone()));
        Ok(user)
    }

    /// Marker is removed first and written last, so a partial write never reads
    /// as an open session
    fn persist_login(&self, credentials: &Credentials) -> SessionResult<()> {
        self.store.remove(keys::AUTH)?;
        self.store.set(keys::AUTH_ROLE, credentials.role.as_str())?;
        self.store.set(keys::AUTH_EMAIL, &credentials.email)?;
        self.store.set(keys::AUTH, keys::AUTH_MARKER)?;

        debug!("Persisted session record for role {}", credentials.role);
        Ok(())
    }

    fn clear_record(&self) -> SessionResult<()> {
        let mut first_error = None;

        for key in keys::ALL {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "Failed to remove session key");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn commit_guard(&self) -> MutexGuard<'_, ()> {
        // The lock guards ordering only; a panicked holder leaves no data behind it
        self.commit_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, state: SessionState) {
        self.state.send_replace(state);
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
