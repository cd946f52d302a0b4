//! Roles and Profiles
//!
//! The closed set of workspace roles, the static per-role display template and the
//! user profile derived from it.

use crate::{SessionError, SessionResult};
use serde::{Deserialize, Serialize};

/// Workspace variant an actor logs in as
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Project portfolio, KPIs and audits
    Administrative,
    /// Case files, trip boards and scheduling
    Technical,
    /// Uploads, approvals and deliveries
    Client,
}

impl Role {
    /// Every role, in presentation order
    pub const ALL: [Role; 3] = [Role::Administrative, Role::Technical, Role::Client];

    /// Canonical storage string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrative => "administrative",
            Role::Technical => "technical",
            Role::Client => "client",
        }
    }

    /// Static display template for this role
    pub fn profile(&self) -> &'static RoleProfile {
        match self {
            Role::Administrative => &ADMINISTRATIVE_PROFILE,
            Role::Technical => &TECHNICAL_PROFILE,
            Role::Client => &CLIENT_PROFILE,
        }
    }

    /// Parse a role, reporting whether the input used a legacy alias
    /// (`admin`, `technician`) rather than the canonical string.
    pub fn parse_with_alias(s: &str) -> SessionResult<(Self, bool)> {
        match s.trim().to_lowercase().as_str() {
            "administrative" => Ok((Role::Administrative, false)),
            "technical" => Ok((Role::Technical, false)),
            "client" => Ok((Role::Client, false)),
            "admin" => Ok((Role::Administrative, true)),
            "technician" => Ok((Role::Technical, true)),
            _ => Err(SessionError::invalid_role(s)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_alias(s).map(|(role, _)| role)
    }
}

/// Static display template for a role
#[derive(Debug, PartialEq, Eq)]
pub struct RoleProfile {
    pub display_name: &'static str,
    pub avatar: &'static str,
    pub default_email: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

static ADMINISTRATIVE_PROFILE: RoleProfile = RoleProfile {
    display_name: "سارا احمدی",
    avatar: "https://i.pravatar.cc/150?img=5",
    default_email: "admin@navalhub.ir",
    title: "Administrative control",
    subtitle: "Project portfolio, KPIs and audits",
};

static TECHNICAL_PROFILE: RoleProfile = RoleProfile {
    display_name: "مهدی رضوی",
    avatar: "https://i.pravatar.cc/150?img=15",
    default_email: "tech@navalhub.ir",
    title: "Technical station",
    subtitle: "Case files, trip board and scheduling",
};

static CLIENT_PROFILE: RoleProfile = RoleProfile {
    display_name: "لیلا جعفری",
    avatar: "https://i.pravatar.cc/150?img=32",
    default_email: "client@navalhub.ir",
    title: "Client dashboard",
    subtitle: "Upload, approval and file delivery",
};

/// Presented identity of the authenticated actor.
///
/// Always derived from a [`RoleProfile`] plus an email override; never persisted on
/// its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: Role,
}

impl UserProfile {
    /// Build a profile for `role`, using `email` when it is present and non-blank
    pub fn for_role(role: Role, email: Option<&str>) -> Self {
        let profile = role.profile();
        let email = email
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(profile.default_email);

        Self {
            name: profile.display_name.to_string(),
            email: email.to_string(),
            avatar: profile.avatar.to_string(),
            role,
        }
    }

    /// Get user display string
    pub fn display_string(&self) -> String {
        format!("{} <{}> ({})", self.name, self.email, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            assert_eq!(role.to_string(), role.as_str());
        }
    }

    #[test]
    fn test_legacy_aliases() {
        assert_eq!(
            Role::parse_with_alias("admin").unwrap(),
            (Role::Administrative, true)
        );
        assert_eq!(
            Role::parse_with_alias(" Technician ").unwrap(),
            (Role::Technical, true)
        );
        assert_eq!(Role::parse_with_alias("CLIENT").unwrap(), (Role::Client, false));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert!(matches!(err, SessionError::InvalidRole { value } if value == "superuser"));
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_strings() {
        let json = serde_json::to_string(&Role::Technical).unwrap();
        assert_eq!(json, "\"technical\"");
        let role: Role = serde_json::from_str("\"client\"").unwrap();
        assert_eq!(role, Role::Client);
    }

    #[test]
    fn test_profile_uses_default_email_for_blank() {
        let user = UserProfile::for_role(Role::Client, Some("   "));
        assert_eq!(user.email, "client@navalhub.ir");
        assert_eq!(user.avatar, Role::Client.profile().avatar);

        let user = UserProfile::for_role(Role::Technical, None);
        assert_eq!(user.email, "tech@navalhub.ir");
    }

    #[test]
    fn test_profile_keeps_submitted_email() {
        let user = UserProfile::for_role(Role::Administrative, Some("ops@fleet.ir"));
        assert_eq!(user.email, "ops@fleet.ir");
        assert_eq!(user.name, Role::Administrative.profile().display_name);
        assert_eq!(user.role, Role::Administrative);
    }
}
