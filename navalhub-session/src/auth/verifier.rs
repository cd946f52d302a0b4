//! Credential Verification
//!
//! The seam where a real authentication provider plugs in. The shipped
//! [`StandInVerifier`] is a mock: it waits a fixed delay and accepts any
//! password. Do not deploy it anywhere credentials matter.

use super::Role;
use crate::SessionResult;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A submitted login form
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Checks submitted credentials before a session is opened.
///
/// Returning `SessionError::LoginRejected` leaves the session untouched.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, credentials: &Credentials) -> SessionResult<()>;
}

/// Placeholder verifier: one suspension point, then unconditional acceptance
#[derive(Debug, Clone)]
pub struct StandInVerifier {
    delay: Duration,
}

impl StandInVerifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }
}

impl Default for StandInVerifier {
    fn default() -> Self {
        Self::from_millis(500)
    }
}

#[async_trait]
impl CredentialVerifier for StandInVerifier {
    async fn verify(&self, credentials: &Credentials) -> SessionResult<()> {
        tokio::time::sleep(self.delay).await;
        debug!(
            email = %credentials.email,
            role = %credentials.role,
            "Stand-in verifier accepted credentials"
        );
        Ok(())
    }
}
