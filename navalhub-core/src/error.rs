//! Error model shared by the NavalHub crates
//!
//! Every error carries an [`ErrorContext`] naming the component that raised it, so a
//! failure in the session store and one in config loading can be told apart in logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, warn};

pub type NavalhubResult<T> = Result<T, NavalhubError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Where and when an error was raised
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Correlates a log line with the error returned to the caller
    pub error_id: String,
    pub timestamp: DateTime<Utc>,
    pub component: String,
    pub operation: Option<String>,
    pub metadata: HashMap<String, String>,
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

#[derive(Error, Debug)]
pub enum NavalhubError {
    /// The durable session record could not be read or written
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<BoxedSource>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
        context: ErrorContext,
    },

    /// A stored or submitted value is outside its allowed set
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },
}

impl NavalhubError {
    pub fn context(&self) -> &ErrorContext {
        match self {
            NavalhubError::Storage { context, .. }
            | NavalhubError::Config { context, .. }
            | NavalhubError::Validation { context, .. } => context,
        }
    }

    /// Storage failures are usually transient (locked file, full disk); bad input is not
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NavalhubError::Storage { .. })
    }

    /// Emit the error at the level its kind deserves
    pub fn log(&self) {
        let context = self.context();
        match self {
            NavalhubError::Storage { .. } => warn!(
                error_id = %context.error_id,
                component = %context.component,
                operation = ?context.operation,
                error = %self,
                "Storage error (may be recoverable)"
            ),
            NavalhubError::Config { .. } | NavalhubError::Validation { .. } => error!(
                error_id = %context.error_id,
                component = %context.component,
                operation = ?context.operation,
                error = %self,
                "Configuration or validation error"
            ),
        }
    }
}

/// `storage_error!(message, component)` or `storage_error!(message, component, source)`
#[macro_export]
macro_rules! storage_error {
    ($msg:expr, $component:expr) => {
        $crate::NavalhubError::Storage {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        $crate::NavalhubError::Storage {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::ErrorContext::new($component),
        }
    };
}

/// `validation_error!(message, field, component)`
#[macro_export]
macro_rules! validation_error {
    ($msg:expr, $field:expr, $component:expr) => {
        $crate::NavalhubError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: $crate::ErrorContext::new($component),
        }
    };
}
