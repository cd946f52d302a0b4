//! Unified logging system
//!
//! Provides structured logging with performance monitoring and configurable output

use serde::{Deserialize, Serialize};
use std::io;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Whether to include file and line information
    pub include_location: bool,
    /// Whether to include thread information
    pub include_thread: bool,
    /// Whether to log to file
    pub log_to_file: bool,
    /// Log file path (if log_to_file is true)
    pub log_file_path: Option<String>,
    /// Whether to enable performance monitoring
    pub enable_performance_monitoring: bool,
    /// Custom filter directives
    pub filter_directives: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            include_location: false,
            include_thread: false,
            log_to_file: false,
            log_file_path: None,
            enable_performance_monitoring: true,
            filter_directives: vec![
                "navalhub=info".to_string(),
                "navalhub_core=info".to_string(),
                "navalhub_session=info".to_string(),
            ],
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging system
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // Add custom filter directives
    for directive in &config.filter_directives {
        filter = filter.add_directive(directive.parse()?);
    }

    let span_events = if config.enable_performance_monitoring {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let base = fmt::layer()
        .with_span_events(span_events)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_thread_ids(config.include_thread)
        .with_thread_names(config.include_thread);

    let fmt_layer: BoxedLayer = if config.log_to_file {
        let Some(log_path) = &config.log_file_path else {
            return Err("log_file_path must be specified when log_to_file is true".into());
        };
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        let writer = std::sync::Mutex::new(file);

        match config.format {
            LogFormat::Json => base.json().with_writer(writer).boxed(),
            LogFormat::Pretty => base.pretty().with_writer(writer).boxed(),
            LogFormat::Compact => base.compact().with_writer(writer).boxed(),
        }
    } else {
        match config.format {
            LogFormat::Json => base.json().with_writer(io::stderr).boxed(),
            LogFormat::Pretty => base.pretty().with_writer(io::stderr).boxed(),
            LogFormat::Compact => base.compact().with_writer(io::stderr).boxed(),
        }
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}

/// Performance monitoring utilities
pub mod performance {
    use std::time::Instant;
    use tracing::{info_span, Instrument};

    /// Measure and log execution time of an async operation
    pub async fn measure_async<F, T>(operation_name: &str, future: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        let span = info_span!("performance", operation = operation_name);
        let start = Instant::now();

        let result = future.instrument(span).await;

        let duration = start.elapsed();
        tracing::debug!(
            target: "performance",
            operation = operation_name,
            duration_ms = duration.as_millis() as u64,
            "Operation completed"
        );

        result
    }
}
