//! Session Types
//!
//! Observable session state and the persisted record it is rebuilt from.

use crate::auth::{Role, UserProfile};
use serde::{Deserialize, Serialize};

/// Fixed storage keys of the persisted session record
pub mod keys {
    /// Literal `"true"` marker while a session is open
    pub const AUTH: &str = "auth";
    /// Canonical role string
    pub const AUTH_ROLE: &str = "authRole";
    /// Email as submitted at login
    pub const AUTH_EMAIL: &str = "authEmail";

    /// Value of [`AUTH`] for an open session
    pub const AUTH_MARKER: &str = "true";

    /// All keys, in removal order
    pub const ALL: [&str; 3] = [AUTH, AUTH_ROLE, AUTH_EMAIL];
}

/// Authoritative runtime session state.
///
/// A user is present exactly when the state is `Authenticated`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(UserProfile),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    /// Create a summary string for logging
    pub fn summary(&self) -> String {
        match self {
            SessionState::Authenticated(user) => {
                format!("Session[authenticated, role={}]", user.role)
            }
            SessionState::Unauthenticated => "Session[unauthenticated]".to_string(),
        }
    }
}

/// Raw three-field record as read from the session store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSessionRecord {
    pub auth: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
}

impl PersistedSessionRecord {
    /// Whether the auth marker is present with its literal value
    pub fn is_marked(&self) -> bool {
        self.auth.as_deref() == Some(keys::AUTH_MARKER)
    }

    /// Whether every field is absent
    pub fn is_empty(&self) -> bool {
        self.auth.is_none() && self.role.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_accessors() {
        let state = SessionState::default();
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());

        let state = SessionState::Authenticated(UserProfile::for_role(Role::Client, None));
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(Role::Client));
    }

    #[test]
    fn test_only_literal_marker_counts() {
        let record = PersistedSessionRecord {
            auth: Some("TRUE".to_string()),
            ..Default::default()
        };
        assert!(!record.is_marked());

        let record = PersistedSessionRecord {
            auth: Some("true".to_string()),
            ..Default::default()
        };
        assert!(record.is_marked());
        assert!(!record.is_empty());
    }
}
