//! Logging and observability
//!
//! Structured logging with:
//! - Console output on stderr (stdout carries document text)
//! - Optional JSON log files with daily or hourly rotation
//! - `RUST_LOG` overrides
//!
//! Log events carry counts and rule kinds only. Document text and redacted
//! values are never logged.
//!
//! # Example
//!
//! ```no_run
//! use safeguard::logging::init_logging;
//! use safeguard::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a redacted document by label and detection counts
///
/// # Example
///
/// ```no_run
/// use safeguard::log_redaction;
/// use safeguard::redaction::RedactionOutcome;
///
/// let outcome = RedactionOutcome { text: String::new(), detections: Vec::new() };
/// log_redaction!("report.txt", &outcome);
/// ```
#[macro_export]
macro_rules! log_redaction {
    ($document:expr, $outcome:expr) => {
        tracing::info!(
            document = %$document,
            detections = $outcome.total_detections(),
            "Document redacted"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use safeguard::log_error_with_context;
/// use safeguard::domain::SafeguardError;
///
/// let error = SafeguardError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
