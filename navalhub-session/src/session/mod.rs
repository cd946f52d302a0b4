//! Session Module
//!
//! Durable session record, the manager that owns the authentication state, and
//! the context handed to presentation code.

pub mod context;
pub mod manager;
pub mod store;
pub mod types;

pub use context::SessionContext;
pub use manager::SessionManager;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use types::*;
