//! CLI command implementations
//!
//! Shared plumbing for the text commands: input reading, context
//! construction from configuration, dynamic rule loading, detection reports
//! and the audit log.

pub mod gatekeep;
pub mod nhs;
pub mod process;
pub mod redact;
pub mod strip;
pub mod validate;

use crate::config::{RuleSourceKind, SafeguardConfig};
use crate::context::RedactionContext;
use crate::redaction::{AuditLogger, RedactionOutcome};
use crate::rules::{FileRuleSource, HttpRuleSource, RuleKind, RuleSource};
use crate::seed::DirectorySeeds;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Exit code for a discarded document
pub const EXIT_DISCARDED: i32 = 3;

/// Exit code for an invalid NHS number
pub const EXIT_INVALID: i32 = 1;

/// Read a document from `file`, or from stdin when no file is given
pub(crate) fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read document from stdin")?;
            Ok(buffer)
        }
    }
}

/// Label used for a document in logs and audit entries
pub(crate) fn document_label(file: Option<&Path>) -> String {
    file.map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string())
}

/// Build the redaction context from the configured seed lists
pub(crate) fn build_context(config: &SafeguardConfig) -> Result<RedactionContext> {
    let context = match config.lexicon.seed_dir {
        Some(ref dir) => RedactionContext::new(&DirectorySeeds::new(dir))
            .with_context(|| format!("Failed to load seed lists from {}", dir.display()))?,
        None => {
            tracing::warn!(
                "Using the built-in sample word lists; set lexicon.seed_dir to full lists for production use"
            );
            RedactionContext::embedded().context("Failed to load embedded seed lists")?
        }
    };

    tracing::debug!(lexicon_words = context.lexicon().len(), "Redaction context ready");
    Ok(context)
}

/// Build the configured dynamic rule source, if any
pub(crate) fn rule_source(config: &SafeguardConfig) -> Result<Option<Box<dyn RuleSource>>> {
    let rules = &config.rules;
    let source: Box<dyn RuleSource> = match rules.source {
        RuleSourceKind::None => return Ok(None),
        RuleSourceKind::File => {
            let path = rules
                .path
                .clone()
                .context("rules.path is required when rules.source = 'file'")?;
            Box::new(FileRuleSource::new(path))
        }
        RuleSourceKind::Http => {
            let url = rules
                .url
                .clone()
                .context("rules.url is required when rules.source = 'http'")?;
            Box::new(HttpRuleSource::new(
                url,
                rules.token.clone(),
                Duration::from_secs(rules.timeout_secs),
            )?)
        }
    };
    Ok(Some(source))
}

/// Make sure dynamic rules of `kinds` are resident
///
/// A fetch failure is logged and the command carries on with whatever rules
/// are already loaded.
pub(crate) async fn ensure_rules(
    context: &RedactionContext,
    config: &SafeguardConfig,
    kinds: &[RuleKind],
) -> Result<()> {
    let Some(source) = rule_source(config)? else {
        return Ok(());
    };

    for &kind in kinds {
        let outcome = context.ensure_rules_loaded(source.as_ref(), kind).await;
        if let Some(diagnostic) = outcome.diagnostic() {
            tracing::warn!(kind = %kind, diagnostic = %diagnostic, "Continuing without complete dynamic rules");
        }
    }
    Ok(())
}

/// Print per-category detection counts as JSON on stderr
pub(crate) fn print_report(outcome: &RedactionOutcome) -> Result<()> {
    let counts: BTreeMap<&str, usize> = outcome
        .counts_by_category()
        .into_iter()
        .map(|(category, count)| (category.label(), count))
        .collect();

    let report = serde_json::json!({
        "detections": outcome.total_detections(),
        "counts": counts,
    });
    eprintln!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    );
    Ok(())
}

/// Append an audit entry when auditing is enabled
pub(crate) fn write_audit(
    config: &SafeguardConfig,
    document: &str,
    outcome: &RedactionOutcome,
    processing_time_ms: u64,
) -> Result<()> {
    let audit = &config.audit;
    let logger = AuditLogger::new(audit.log_path.clone(), audit.json_format, audit.enabled)?
        .with_salt(audit.hash_salt.clone());
    logger.log_redaction(document, outcome, processing_time_ms)
}
