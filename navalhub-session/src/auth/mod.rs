//! Role and Authentication Module
//!
//! - Closed role set with static display profiles
//! - Role to landing route resolution
//! - Credential verification seam (currently a stand-in)

pub mod role;
pub mod router;
pub mod verifier;

pub use role::{Role, RoleProfile, UserProfile};
pub use router::home_path_for;
pub use verifier::{CredentialVerifier, Credentials, StandInVerifier};
