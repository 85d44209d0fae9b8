//! Configuration schema types
//!
//! Every section is optional; an empty file yields a working configuration
//! (embedded seeds, no dynamic rules, no audit log, console logging only).

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Safeguard configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SafeguardConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Seed word lists
    #[serde(default)]
    pub lexicon: LexiconConfig,

    /// Dynamic boilerplate/wipeout rule supply
    #[serde(default)]
    pub rules: RulesConfig,

    /// Redaction audit log
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SafeguardConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.lexicon.validate()?;
        self.rules.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Seed list location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Directory holding the seed lists; the embedded lists are used when unset
    #[serde(default)]
    pub seed_dir: Option<PathBuf>,
}

impl LexiconConfig {
    /// True when no `seed_dir` is set and the small built-in lists are used
    ///
    /// The built-in general word list is a sample; most ordinary vocabulary
    /// is redacted with it. Production runs point `seed_dir` at full lists.
    pub fn uses_embedded_seeds(&self) -> bool {
        self.seed_dir.is_none()
    }

    fn validate(&self) -> Result<(), String> {
        if let Some(ref dir) = self.seed_dir {
            if !dir.is_dir() {
                return Err(format!(
                    "lexicon.seed_dir is not a directory: {}",
                    dir.display()
                ));
            }
        }
        Ok(())
    }
}

/// Where dynamic rules come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSourceKind {
    /// Seed markers only
    #[default]
    None,
    /// TOML rules file
    File,
    /// HTTP rule service
    Http,
}

impl std::str::FromStr for RuleSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "file" => Ok(Self::File),
            "http" => Ok(Self::Http),
            other => Err(format!(
                "Invalid rules.source '{other}'. Must be one of: none, file, http"
            )),
        }
    }
}

/// Dynamic rule source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Source type
    #[serde(default)]
    pub source: RuleSourceKind,

    /// Rules file (source = "file")
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Rule service base URL (source = "http")
    #[serde(default)]
    pub url: Option<String>,

    /// Bearer token for the rule service
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RulesConfig {
    fn validate(&self) -> Result<(), String> {
        match self.source {
            RuleSourceKind::None => {}
            RuleSourceKind::File => match self.path {
                Some(ref path) if path.is_file() => {}
                Some(ref path) => {
                    return Err(format!("rules.path not found: {}", path.display()));
                }
                None => return Err("rules.path is required when rules.source = 'file'".to_string()),
            },
            RuleSourceKind::Http => {
                let url = self.url.as_deref().unwrap_or_default();
                if url.is_empty() {
                    return Err("rules.url is required when rules.source = 'http'".to_string());
                }
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err("rules.url must start with http:// or https://".to_string());
                }
                if self.token.as_ref().is_some_and(|t| t.expose_secret().is_empty()) {
                    return Err("rules.token cannot be empty".to_string());
                }
            }
        }

        if self.timeout_secs == 0 {
            return Err("rules.timeout_secs must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            source: RuleSourceKind::None,
            path: None,
            url: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_true")]
    pub json_format: bool,

    /// Secret mixed into every value hash
    ///
    /// Without it, short values such as dates and surnames can be recovered
    /// from their hashes with a dictionary.
    #[serde(default)]
    pub hash_salt: Option<SecretString>,
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("audit.log_path cannot be empty when audit is enabled".to_string());
        }
        if self.hash_salt.as_ref().is_some_and(|s| s.expose_secret().is_empty()) {
            return Err("audit.hash_salt cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: true,
            hash_salt: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/redaction.log")
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
