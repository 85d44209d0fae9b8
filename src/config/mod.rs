//! Configuration management for Safeguard.
//!
//! Safeguard uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SAFEGUARD_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [lexicon]
//! seed_dir = "/etc/safeguard/seeds"
//!
//! [rules]
//! source = "http"
//! url = "https://reference-data.example.org/rules"
//! token = "${SAFEGUARD_RULES_TOKEN}"
//! timeout_secs = 10
//!
//! [audit]
//! enabled = true
//! log_path = "/var/log/safeguard/audit.log"
//! hash_salt = "${SAFEGUARD_AUDIT_HASH_SALT}"
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/safeguard"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, AuditConfig, LexiconConfig, LoggingConfig, RuleSourceKind, RulesConfig,
    SafeguardConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
