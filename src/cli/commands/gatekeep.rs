//! Gatekeep command implementation
//!
//! Prints the trimmed document and exits 0 when it is kept; exits with
//! [`EXIT_DISCARDED`] and prints nothing when it is discarded.

use super::{build_context, ensure_rules, read_input, EXIT_DISCARDED};
use crate::config::SafeguardConfig;
use crate::rules::{DiscardReason, RuleKind, Verdict};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the gatekeep command
#[derive(Args, Debug)]
pub struct GatekeepArgs {
    /// Report file (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

impl GatekeepArgs {
    /// Execute the gatekeep command
    pub async fn execute(&self, config: &SafeguardConfig) -> anyhow::Result<i32> {
        let document = read_input(self.file.as_deref())?;
        let context = build_context(config)?;
        ensure_rules(&context, config, &[RuleKind::Wipeout]).await?;

        match context.gatekeep(&document) {
            Verdict::Keep(kept) => {
                println!("{kept}");
                Ok(0)
            }
            Verdict::Discard(reason) => {
                log_discard(&reason);
                Ok(EXIT_DISCARDED)
            }
        }
    }
}

pub(crate) fn log_discard(reason: &DiscardReason) {
    match reason {
        DiscardReason::Empty => tracing::info!("Document discarded: empty"),
        DiscardReason::MatchedRule(rule) => {
            tracing::info!(rule = %rule, "Document discarded: matched wipeout rule")
        }
    }
}
