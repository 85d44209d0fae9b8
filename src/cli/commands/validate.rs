//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Safeguard configuration file.

use super::{build_context, rule_source};
use crate::config::{load_config, RuleSourceKind};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Unlike the text commands, a missing file is an error here.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let context = match build_context(&config) {
            Ok(context) => context,
            Err(e) => {
                println!("❌ Failed to load seed lists");
                println!("   Error: {e:#}");
                return Ok(2);
            }
        };
        if let Err(e) = rule_source(&config) {
            println!("❌ Failed to build rule source");
            println!("   Error: {e:#}");
            return Ok(2);
        }

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        match config.lexicon.seed_dir {
            Some(ref dir) => println!("  Seed Lists: {}", dir.display()),
            None => println!("  Seed Lists: embedded"),
        }
        if config.lexicon.uses_embedded_seeds() {
            println!("  ⚠️  Built-in sample word lists in use; set lexicon.seed_dir for production");
        }
        println!("  Lexicon Words: {}", context.lexicon().len());
        match config.rules.source {
            RuleSourceKind::None => println!("  Rule Source: none"),
            RuleSourceKind::File => println!(
                "  Rule Source: file ({})",
                config
                    .rules
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            ),
            RuleSourceKind::Http => {
                println!(
                    "  Rule Source: http ({})",
                    config.rules.url.as_deref().unwrap_or_default()
                );
                println!(
                    "  Rule Token: {}",
                    if config.rules.token.is_some() { "set" } else { "not set" }
                );
                println!("  Timeout: {}s", config.rules.timeout_secs);
            }
        }
        println!(
            "  Audit Log: {}",
            if config.audit.enabled {
                config.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        if config.audit.enabled {
            println!(
                "  Audit Hash Salt: {}",
                if config.audit.hash_salt.is_some() { "set" } else { "not set" }
            );
        }
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(0)
    }
}
