//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Safeguard using clap.
//! Document text is read from a file or stdin and written to stdout; logs go
//! to stderr.

pub mod commands;

use clap::{Parser, Subcommand};

const SEED_LISTS_HELP: &str = "\
Without lexicon.seed_dir in the configuration file, Safeguard uses small \
built-in sample word lists and redacts most ordinary vocabulary. Point \
lexicon.seed_dir at a directory holding full words.txt, medical_terms.txt, \
medical_acronyms.txt and custom_dictionary.txt lists for production use.";

/// Safeguard - Clinical report de-identification
#[derive(Parser, Debug)]
#[command(name = "safeguard")]
#[command(version, about, long_about = None)]
#[command(author = "Safeguard Contributors")]
#[command(after_long_help = SEED_LISTS_HELP)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "safeguard.toml", env = "SAFEGUARD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SAFEGUARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redact PII from a report
    Redact(commands::redact::RedactArgs),

    /// Strip boilerplate markers from a report
    Strip(commands::strip::StripArgs),

    /// Decide whether a report is kept or discarded
    Gatekeep(commands::gatekeep::GatekeepArgs),

    /// Validate and clean an NHS number
    Nhs(commands::nhs::NhsArgs),

    /// Strip, gatekeep and redact a report in one pass
    Process(commands::process::ProcessArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}
