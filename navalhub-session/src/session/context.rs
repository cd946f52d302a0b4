//! Session Context
//!
//! The handle presentation code receives. It reads the derived session state and
//! calls the two mutating operations, but has no path to the raw storage keys.

use super::manager::SessionManager;
use super::types::SessionState;
use crate::auth::{home_path_for, Credentials, Role, UserProfile};
use crate::SessionResult;
use std::sync::Arc;
use tokio::sync::watch;

/// Cheap-clone, read-mostly view over the shared session manager
#[derive(Debug, Clone)]
pub struct SessionContext {
    manager: Arc<SessionManager>,
}

impl SessionContext {
    pub fn new(manager: SessionManager) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.manager.is_authenticated()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.manager.user()
    }

    pub fn state(&self) -> SessionState {
        self.manager.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.manager.subscribe()
    }

    /// Submit a login form
    pub async fn login(&self, email: &str, password: &str, role: Role) -> SessionResult<UserProfile> {
        self.manager
            .login(Credentials::new(email, password, role))
            .await
    }

    pub fn logout(&self) -> SessionResult<()> {
        self.manager.logout()
    }

    /// Landing path for whoever is signed in now
    pub fn home_path(&self) -> &'static str {
        home_path_for(self.manager.state().role())
    }
}

impl From<SessionManager> for SessionContext {
    fn from(manager: SessionManager) -> Self {
        Self::new(manager)
    }
}
