//! Strip command implementation

use super::{build_context, ensure_rules, read_input};
use crate::config::SafeguardConfig;
use crate::rules::RuleKind;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the strip command
#[derive(Args, Debug)]
pub struct StripArgs {
    /// Report file (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

impl StripArgs {
    /// Execute the strip command
    pub async fn execute(&self, config: &SafeguardConfig) -> anyhow::Result<i32> {
        let stripped = self.run(config).await?;
        println!("{stripped}");
        Ok(0)
    }

    async fn run(&self, config: &SafeguardConfig) -> anyhow::Result<String> {
        let document = read_input(self.file.as_deref())?;
        let context = build_context(config)?;
        ensure_rules(&context, config, &[RuleKind::Boilerplate]).await?;

        let stripped = context.strip_boilerplate(&document);
        tracing::debug!(
            input_len = document.len(),
            output_len = stripped.len(),
            "Boilerplate stripped"
        );

        Ok(stripped)
    }
}
