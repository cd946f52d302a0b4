//! Role Router
//!
//! Maps a role to its canonical landing path. Pure and safe to call from
//! presentation code without touching session state.

use super::Role;

impl Role {
    /// Landing path for this role
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Administrative => "/dashboard",
            Role::Technical => "/dashboard/technician",
            Role::Client => "/dashboard/client",
        }
    }
}

/// Landing path for an optional role; no role lands on the administrative path
pub fn home_path_for(role: Option<Role>) -> &'static str {
    role.unwrap_or(Role::Administrative).home_path()
}
