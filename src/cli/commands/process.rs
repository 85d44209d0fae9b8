//! Process command implementation
//!
//! Runs the full pipeline: boilerplate is stripped, the remainder is
//! gatekept, and a kept document is redacted.

use super::gatekeep::log_discard;
use super::{
    build_context, document_label, ensure_rules, print_report, read_input, write_audit,
    EXIT_DISCARDED,
};
use crate::config::SafeguardConfig;
use crate::context::ProcessOutcome;
use crate::log_redaction;
use crate::redaction::ScrubList;
use crate::rules::RuleKind;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Comma-separated terms that must always be redacted (e.g. patient names)
    #[arg(short, long)]
    pub scrub: Option<String>,

    /// Print detection counts per category as JSON on stderr
    #[arg(long)]
    pub report: bool,

    /// Report file (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

impl ProcessArgs {
    /// Execute the process command
    pub async fn execute(&self, config: &SafeguardConfig) -> anyhow::Result<i32> {
        match self.run(config).await? {
            ProcessOutcome::Discarded(reason) => {
                log_discard(&reason);
                Ok(EXIT_DISCARDED)
            }
            ProcessOutcome::Redacted(outcome) => {
                println!("{}", outcome.text);
                Ok(0)
            }
        }
    }

    /// Run the pipeline; a kept document is audited and reported
    async fn run(&self, config: &SafeguardConfig) -> anyhow::Result<ProcessOutcome> {
        let document = read_input(self.file.as_deref())?;
        let label = document_label(self.file.as_deref());
        let context = build_context(config)?;
        ensure_rules(&context, config, &RuleKind::ALL).await?;

        let started = Instant::now();
        let scrub_list = ScrubList::from_csv(self.scrub.as_deref().unwrap_or_default());
        let processed = context.process(&document, scrub_list);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if let ProcessOutcome::Redacted(ref outcome) = processed {
            log_redaction!(label, outcome);
            write_audit(config, &label, outcome, elapsed_ms)?;
            if self.report {
                print_report(outcome)?;
            }
        }
        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn run(content: &str) -> i32 {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, content).unwrap();

        ProcessArgs {
            scrub: None,
            report: false,
            file: Some(path),
        }
        .execute(&SafeguardConfig::default())
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_process_keeps_report() {
        assert_eq!(run("~BNormal scan.~b").await, 0);
    }

    #[tokio::test]
    async fn test_process_discards_marker_only_report() {
        assert_eq!(run("~B~b").await, EXIT_DISCARDED);
    }

    #[tokio::test]
    async fn test_process_output_and_audit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "~BNormal scan reviewed by Dr Smith.~b").unwrap();
        let log_path = dir.path().join("audit.log");

        let mut config = SafeguardConfig::default();
        config.audit.enabled = true;
        config.audit.log_path = log_path.clone();

        let args = ProcessArgs {
            scrub: Some("Smith".to_string()),
            report: true,
            file: Some(path),
        };
        match args.run(&config).await.unwrap() {
            ProcessOutcome::Redacted(outcome) => {
                assert_eq!(outcome.text, "Normal scan reviewed by Dr [REDACTED].");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let contents = std::fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("\"SCRUB_TERM\":1"));
        assert!(!contents.contains("Smith"));
    }

    #[tokio::test]
    async fn test_process_discard_writes_no_audit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "~B~b").unwrap();
        let log_path = dir.path().join("audit.log");

        let mut config = SafeguardConfig::default();
        config.audit.enabled = true;
        config.audit.log_path = log_path.clone();

        let args = ProcessArgs {
            scrub: None,
            report: false,
            file: Some(path),
        };
        assert!(matches!(
            args.run(&config).await.unwrap(),
            ProcessOutcome::Discarded(_)
        ));
        assert!(!log_path.exists());
    }
}
