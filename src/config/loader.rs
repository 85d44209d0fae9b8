//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SafeguardConfig;
use crate::config::secret_string;
use crate::domain::errors::SafeguardError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SafeguardConfig
/// 4. Applies environment variable overrides (SAFEGUARD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is not set, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use safeguard::config::loader::load_config;
///
/// let config = load_config("safeguard.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SafeguardConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SafeguardError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SafeguardError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: SafeguardConfig = toml::from_str(&contents)
        .map_err(|e| SafeguardError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finalize(config)
}

/// Like [`load_config`], but a missing file yields the defaults
///
/// Environment overrides and validation still apply.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<SafeguardConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    finalize(SafeguardConfig::default())
}

fn finalize(mut config: SafeguardConfig) -> Result<SafeguardConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        SafeguardError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SafeguardError::pattern(r"\$\{([A-Z_][A-Z0-9_]*)\}", &e))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SafeguardError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using SAFEGUARD_* prefix
///
/// Environment variables follow the pattern: SAFEGUARD_<SECTION>_<KEY>
/// For example: SAFEGUARD_RULES_URL, SAFEGUARD_AUDIT_ENABLED
fn apply_env_overrides(config: &mut SafeguardConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("SAFEGUARD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Lexicon overrides
    if let Ok(val) = std::env::var("SAFEGUARD_LEXICON_SEED_DIR") {
        config.lexicon.seed_dir = Some(PathBuf::from(val));
    }

    // Rules overrides
    if let Ok(val) = std::env::var("SAFEGUARD_RULES_SOURCE") {
        config.rules.source = val.parse().map_err(SafeguardError::Configuration)?;
    }
    if let Ok(val) = std::env::var("SAFEGUARD_RULES_PATH") {
        config.rules.path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("SAFEGUARD_RULES_URL") {
        config.rules.url = Some(val);
    }
    if let Ok(val) = std::env::var("SAFEGUARD_RULES_TOKEN") {
        config.rules.token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SAFEGUARD_RULES_TIMEOUT_SECS") {
        if let Ok(timeout) = val.parse() {
            config.rules.timeout_secs = timeout;
        }
    }

    // Audit overrides
    if let Ok(val) = std::env::var("SAFEGUARD_AUDIT_ENABLED") {
        config.audit.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SAFEGUARD_AUDIT_LOG_PATH") {
        config.audit.log_path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("SAFEGUARD_AUDIT_JSON_FORMAT") {
        config.audit.json_format = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("SAFEGUARD_AUDIT_HASH_SALT") {
        config.audit.hash_salt = Some(secret_string(val));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SAFEGUARD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SAFEGUARD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("SAFEGUARD_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
