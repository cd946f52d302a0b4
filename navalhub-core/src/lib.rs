//! NavalHub Core - Shared infrastructure
//!
//! Error model, logging setup and configuration used by every NavalHub crate

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
pub use logging::*;

// Re-export commonly used external types
pub use async_trait::async_trait;
pub use tokio;
pub use tracing;
