//! Redact command implementation
//!
//! Replaces dates, phone numbers, NHS-number-shaped digit runs, emails,
//! postcodes, scrub-listed terms and unknown words with `[REDACTED]`.

use super::{build_context, document_label, print_report, read_input, write_audit};
use crate::config::SafeguardConfig;
use crate::log_redaction;
use crate::redaction::{RedactionOutcome, ScrubList};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Comma-separated terms that must always be redacted (e.g. patient names)
    #[arg(short, long)]
    pub scrub: Option<String>,

    /// Print detection counts per category as JSON on stderr
    #[arg(long)]
    pub report: bool,

    /// Report file (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(&self, config: &SafeguardConfig) -> anyhow::Result<i32> {
        let outcome = self.run(config)?;
        println!("{}", outcome.text);
        Ok(0)
    }

    /// Redact the input, writing the audit entry and report on the way
    fn run(&self, config: &SafeguardConfig) -> anyhow::Result<RedactionOutcome> {
        let document = read_input(self.file.as_deref())?;
        let label = document_label(self.file.as_deref());
        let context = build_context(config)?;

        let started = Instant::now();
        let scrub_list = ScrubList::from_csv(self.scrub.as_deref().unwrap_or_default());
        let outcome = context.redact_with_detections(&document, scrub_list);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        log_redaction!(label, outcome);
        write_audit(config, &label, &outcome, elapsed_ms)?;
        if self.report {
            print_report(&outcome)?;
        }

        Ok(outcome)
    }
}
