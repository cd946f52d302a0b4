//! NavalHub Session - Session lifecycle and role access for the workspace shell
//!
//! Answers one question on every page load and every login attempt: is there an
//! authenticated actor, and which workspace variant should they land on?
//!
//! ## Architecture
//!
//! - **auth**: closed [`Role`] set, static role profiles, landing routes and the
//!   credential verification seam
//! - **session**: the durable [`SessionStore`] contract and adapters, the
//!   [`SessionManager`] state machine and the presentation-facing [`SessionContext`]
//!
//! Presentation code only ever holds a [`SessionContext`]; it observes the derived
//! [`SessionState`] and never reads or writes storage keys.

pub mod auth;
pub mod session;

pub use auth::{
    home_path_for, CredentialVerifier, Credentials, Role, RoleProfile, StandInVerifier,
    UserProfile,
};
pub use session::{
    FileSessionStore, MemorySessionStore, PersistedSessionRecord, SessionContext,
    SessionManager, SessionState, SessionStore,
};

/// Session-level error type
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Core error: {0}")]
    Core(#[from] navalhub_core::NavalhubError),

    #[error("Session store error: {message}")]
    Store { message: String },

    #[error("Login rejected: {reason}")]
    LoginRejected { reason: String },

    #[error("Invalid role: {value}")]
    InvalidRole { value: String },
}

pub type SessionResult<T> = Result<T, SessionError>;

impl SessionError {
    /// Wrap a store failure in the shared storage error, recording which file
    /// and step failed
    pub fn storage<E>(operation: &str, path: &std::path::Path, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Core(navalhub_core::NavalhubError::Storage {
            message: format!("{} failed for {}: {}", operation, path.display(), source),
            source: Some(Box::new(source)),
            context: navalhub_core::ErrorContext::new("session_store")
                .with_operation(operation)
                .with_metadata("path", &path.display().to_string()),
        })
    }

    /// Create a store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a login rejection
    pub fn login_rejected<S: Into<String>>(reason: S) -> Self {
        Self::LoginRejected {
            reason: reason.into(),
        }
    }

    /// Create an invalid role error
    pub fn invalid_role<S: Into<String>>(value: S) -> Self {
        Self::InvalidRole {
            value: value.into(),
        }
    }

    /// Whether the caller may retry the same operation
    pub fn is_recoverable(&self) -> bool {
        match self {
            SessionError::Core(e) => e.is_recoverable(),
            SessionError::Store { .. } => true,
            SessionError::LoginRejected { .. } => false,
            SessionError::InvalidRole { .. } => false,
        }
    }
}
