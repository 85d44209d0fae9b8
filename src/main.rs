// Safeguard - Clinical report de-identification engine
// Copyright (c) 2025 Safeguard Contributors
// Licensed under the MIT License

use clap::Parser;
use safeguard::cli::{Cli, Commands};
use safeguard::config::{load_config_or_default, SafeguardConfig};
use safeguard::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config_or_default(&cli.config) {
        Ok(config) => config,
        // validate-config reports load errors itself
        Err(_) if matches!(cli.command, Commands::ValidateConfig(_)) => SafeguardConfig::default(),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "Safeguard - Clinical report de-identification engine"
    );

    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            safeguard::log_error_with_context!(e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    config: &SafeguardConfig,
) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Redact(args) => args.execute(config).await,
        Commands::Strip(args) => args.execute(config).await,
        Commands::Gatekeep(args) => args.execute(config).await,
        Commands::Nhs(args) => args.execute().await,
        Commands::Process(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
    }
}
